//! Components referenced by an SBOM without being part of it.
//!
//! Such a component lives in some external system, for example a clearing
//! backend. CycloneDX has no component slot for this, so it is stored as a
//! document-level external reference of type `other` whose URL is a purl and
//! whose comment holds an encoded string map of extra attributes.

use crate::codec::string_map;
use crate::codec::ext_ref::{new_ext_ref, set_url_str, url_str};
use crate::error::{Result, StandardBomError};
use crate::model::component_type::ComponentType;
use regex::Regex;
use serde_cyclonedx::cyclonedx::v_1_6::ExternalReference;
use std::borrow::{Borrow, BorrowMut};
use std::sync::OnceLock;

/// A purl meaning "the purl is not known". Still a syntactically valid purl,
/// used as the default value of the `url` field because an external
/// reference cannot go without one.
pub const UNKNOWN_PURL: &str = "pkg:generic/com.siemens.scp/no-purl";

pub(crate) const TYPE_OTHER: &str = "other";

const KEY_DESCRIPTION: &str = "Description";
const KEY_EXTERNAL_ID: &str = "ExternalId";
const KEY_LEGAL_REMARK: &str = "LegalRemark";
const KEY_TYPE: &str = "Type";

/// In BlackDuck CodeCenter, IDs are decimal numbers of up to 12 digits.
pub fn blackduck_component_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{1,12}$").expect("static ID pattern"))
}

/// In SW360, IDs are 32-digit hexadecimal values.
pub fn sw360_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-fA-F]{32}$").expect("static ID pattern"))
}

fn purl_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^pkg:[a-z]+/.+$").expect("static purl pattern"))
}

/// Does this external reference encode an external component?
///
/// It must be of type `other`, its URL must be a purl, and its comment, if
/// present, must decode as a string map.
#[must_use]
pub fn is_external_component(ext_ref: &ExternalReference) -> bool {
    ext_ref.type_ == TYPE_OTHER
        && ext_ref
            .url
            .as_str()
            .is_some_and(|url| purl_pattern().is_match(url))
        && ext_ref
            .comment
            .as_deref()
            .map_or(true, string_map::is_decodable)
}

/// A component which is referenced by this SBOM, but which is not itself
/// part of it.
#[derive(Debug)]
pub struct ExternalComponent<R = ExternalReference> {
    ext_ref: R,
}

impl ExternalComponent {
    /// Create an external component with the [`UNKNOWN_PURL`] placeholder.
    #[must_use]
    pub fn new() -> Self {
        let mut ext_ref = new_ext_ref(UNKNOWN_PURL);
        ext_ref.type_ = TYPE_OTHER.to_string();
        Self { ext_ref }
    }

    /// Take over an existing reference, forcing type and placeholder URL.
    #[must_use]
    pub fn from_ext_ref(mut ext_ref: ExternalReference) -> Self {
        ext_ref.type_ = TYPE_OTHER.to_string();
        set_url_str(&mut ext_ref, UNKNOWN_PURL);
        Self { ext_ref }
    }

    #[must_use]
    pub fn into_ext_ref(self) -> ExternalReference {
        self.ext_ref
    }
}

impl Default for ExternalComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Borrow<ExternalReference>> ExternalComponent<R> {
    pub(crate) fn view(ext_ref: R) -> Self {
        Self { ext_ref }
    }

    fn r(&self) -> &ExternalReference {
        self.ext_ref.borrow()
    }

    fn map_get(&self, key: &str) -> Option<String> {
        string_map::get(self.r().comment.as_deref(), key)
    }

    /// The ID which identifies this component in the external system.
    #[must_use]
    pub fn external_id(&self) -> Option<String> {
        self.map_get(KEY_EXTERNAL_ID)
    }

    /// The purl of the referenced component.
    #[must_use]
    pub fn url(&self) -> &str {
        url_str(self.r())
    }

    #[must_use]
    pub fn legal_remark(&self) -> Option<String> {
        self.map_get(KEY_LEGAL_REMARK)
    }

    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.map_get(KEY_DESCRIPTION)
    }

    /// The component type, if one is recorded and recognized.
    #[must_use]
    pub fn component_type(&self) -> Option<ComponentType> {
        self.map_get(KEY_TYPE)
            .and_then(|s| ComponentType::from_type_name(&s))
    }

    /// The underlying CycloneDX external reference.
    pub fn cyclonedx_ref(&self) -> &ExternalReference {
        self.r()
    }
}

impl<R: BorrowMut<ExternalReference>> ExternalComponent<R> {
    fn r_mut(&mut self) -> &mut ExternalReference {
        self.ext_ref.borrow_mut()
    }

    fn map_set(&mut self, key: &str, value: Option<&str>) {
        let r = self.r_mut();
        r.comment = string_map::set(r.comment.as_deref(), key, value);
    }

    /// Set the external ID, optionally validated against a pattern such as
    /// [`sw360_id_pattern`] or [`blackduck_component_id_pattern`].
    pub fn set_external_id(
        &mut self,
        external_id: Option<&str>,
        validation_pattern: Option<&Regex>,
    ) -> Result<()> {
        if let (Some(id), Some(pattern)) = (external_id, validation_pattern) {
            if !pattern.is_match(id) {
                return Err(StandardBomError::validation(format!(
                    "ExternalId \"{id}\" does not match the validation pattern: {}",
                    pattern.as_str()
                )));
            }
        }
        self.map_set(KEY_EXTERNAL_ID, external_id);
        Ok(())
    }

    /// Set the purl of the referenced component. `None` resets the field to
    /// the [`UNKNOWN_PURL`] placeholder.
    pub fn set_url(&mut self, purl: Option<&str>) -> Result<()> {
        match purl {
            None => {
                set_url_str(self.r_mut(), UNKNOWN_PURL);
                Ok(())
            }
            Some(p) if purl_pattern().is_match(p) => {
                set_url_str(self.r_mut(), p);
                Ok(())
            }
            Some(p) => Err(StandardBomError::validation(format!("value is not a purl: {p}"))),
        }
    }

    pub fn set_legal_remark(&mut self, legal_remark: Option<&str>) {
        self.map_set(KEY_LEGAL_REMARK, legal_remark);
    }

    pub fn set_description(&mut self, description: Option<&str>) {
        self.map_set(KEY_DESCRIPTION, description);
    }

    pub fn set_component_type(&mut self, component_type: Option<ComponentType>) {
        self.map_set(KEY_TYPE, component_type.map(ComponentType::type_name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_placeholder_purl() {
        let ec = ExternalComponent::new();
        assert_eq!(ec.url(), UNKNOWN_PURL);
        assert!(is_external_component(ec.cyclonedx_ref()));
    }

    #[test]
    fn test_attributes_round_trip_through_comment() {
        let mut ec = ExternalComponent::new();
        ec.set_external_id(Some("0123456789ab0123456789ab0123456789ab"), None)
            .expect("no pattern given");
        ec.set_component_type(Some(ComponentType::Library));
        ec.set_description(Some("a useful library"));
        ec.set_legal_remark(Some("cleared"));

        assert_eq!(
            ec.external_id().as_deref(),
            Some("0123456789ab0123456789ab0123456789ab")
        );
        assert_eq!(ec.component_type(), Some(ComponentType::Library));
        assert_eq!(ec.description().as_deref(), Some("a useful library"));
        assert_eq!(ec.legal_remark().as_deref(), Some("cleared"));
        assert!(is_external_component(ec.cyclonedx_ref()));
    }

    #[test]
    fn test_external_id_pattern_enforced() {
        let mut ec = ExternalComponent::new();
        let result = ec.set_external_id(Some("not-a-number"), Some(blackduck_component_id_pattern()));
        assert!(result.is_err());
        assert!(ec.external_id().is_none());

        ec.set_external_id(Some("123456"), Some(blackduck_component_id_pattern()))
            .expect("valid BlackDuck ID");
        assert_eq!(ec.external_id().as_deref(), Some("123456"));
    }

    #[test]
    fn test_set_url_validates_purl() {
        let mut ec = ExternalComponent::new();
        ec.set_url(Some("pkg:maven/org.example/lib@1.0"))
            .expect("valid purl");
        assert_eq!(ec.url(), "pkg:maven/org.example/lib@1.0");
        assert!(ec.set_url(Some("https://example.com")).is_err());
        ec.set_url(None).expect("reset accepts None");
        assert_eq!(ec.url(), UNKNOWN_PURL);
    }

    #[test]
    fn test_probe_rejects_wrong_shape() {
        let mut not_a_purl = new_ext_ref("https://example.com");
        not_a_purl.type_ = TYPE_OTHER.to_string();
        assert!(!is_external_component(&not_a_purl));

        let mut wrong_type = new_ext_ref(UNKNOWN_PURL);
        wrong_type.type_ = "website".to_string();
        assert!(!is_external_component(&wrong_type));

        let mut garbled_comment = new_ext_ref(UNKNOWN_PURL);
        garbled_comment.type_ = TYPE_OTHER.to_string();
        garbled_comment.comment = Some("broken \\u12".to_string());
        assert!(!is_external_component(&garbled_comment));

        // the schema allows arbitrary JSON in the url slot
        let mut non_string_url = new_ext_ref(UNKNOWN_PURL);
        non_string_url.type_ = TYPE_OTHER.to_string();
        non_string_url.url = serde_json::Value::Null;
        assert!(!is_external_component(&non_string_url));
    }
}
