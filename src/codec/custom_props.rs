//! Namespaced custom properties on CycloneDX property lists.
//!
//! A key without a namespace separator is qualified with the vendor
//! namespace before lookup or storage; a key that already carries one is
//! used verbatim, so foreign namespaces can coexist in the same list.

use crate::codec::keyed_list;
use serde_cyclonedx::cyclonedx::v_1_6::Property;
use std::borrow::Cow;

/// Namespace of our custom properties as per the
/// [Siemens property taxonomy](https://github.com/siemens/cyclonedx-property-taxonomy)
/// for CycloneDX.
pub const CUSTOM_PROPERTY_NAMESPACE: &str = "siemens";

/// Qualify `key` with the vendor namespace unless it already has one.
#[must_use]
pub fn namespaced_key(key: &str) -> Cow<'_, str> {
    if key.contains(':') {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(format!("{CUSTOM_PROPERTY_NAMESPACE}:{key}"))
    }
}

/// Value of the property `key` (namespace-qualified if unqualified).
pub fn get<'a>(properties: Option<&'a [Property]>, key: &str) -> Option<&'a str> {
    keyed_list::PROPERTIES.first(properties, &namespaced_key(key))
}

/// Set or remove the property `key`.
///
/// A `None` or blank-after-trim value removes the property; otherwise the
/// trimmed value replaces any prior value for the (namespaced) key. An empty
/// property list is normalized back to absent.
pub fn set(properties: &mut Option<Vec<Property>>, key: &str, value: Option<&str>) {
    let key = namespaced_key(key);
    keyed_list::PROPERTIES.remove_all(properties.as_mut(), &key);
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            properties.get_or_insert_with(Vec::new).push(Property {
                name: key.into_owned(),
                value: Some(trimmed.to_string()),
            });
        }
    }
    if properties.as_ref().is_some_and(Vec::is_empty) {
        *properties = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unqualified_key_gets_vendor_namespace() {
        let mut props = None;
        set(&mut props, "legalRemark", Some("v"));
        let list = props.as_ref().expect("property stored");
        assert_eq!(list[0].name, "siemens:legalRemark");
    }

    #[test]
    fn test_foreign_namespace_is_stored_verbatim() {
        let mut props = None;
        set(&mut props, "foreign:key", Some("v"));
        let list = props.as_ref().expect("property stored");
        assert_eq!(list[0].name, "foreign:key");
    }

    #[test]
    fn test_qualified_and_unqualified_reads_agree() {
        let mut props = None;
        set(&mut props, "key", Some("v"));
        assert_eq!(get(props.as_deref(), "key"), Some("v"));
        assert_eq!(get(props.as_deref(), "siemens:key"), Some("v"));
    }

    #[test]
    fn test_blank_value_removes_property() {
        let mut props = None;
        set(&mut props, "direct", Some("true"));
        set(&mut props, "direct", Some("   "));
        assert!(props.is_none());

        set(&mut props, "direct", Some("true"));
        set(&mut props, "direct", None);
        assert!(props.is_none());
    }

    #[test]
    fn test_set_replaces_prior_value_and_trims() {
        let mut props = None;
        set(&mut props, "primaryLanguage", Some("Java"));
        set(&mut props, "primaryLanguage", Some("  Rust  "));
        assert_eq!(get(props.as_deref(), "primaryLanguage"), Some("Rust"));
        assert_eq!(props.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_at_most_one_value_per_key() {
        let mut props = Some(vec![
            Property {
                name: "siemens:profile".to_string(),
                value: Some("clearing".to_string()),
            },
            Property {
                name: "siemens:profile".to_string(),
                value: Some("stale".to_string()),
            },
        ]);
        set(&mut props, "profile", Some("external"));
        let list = props.expect("property stored");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].value.as_deref(), Some("external"));
    }
}
