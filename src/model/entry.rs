//! The typed view onto a single SBOM component.

use crate::codec::custom_props;
use crate::codec::ext_ref;
use crate::codec::file_url;
use crate::codec::hash_field::{self, HashAlgorithm};
use crate::error::Result;
use crate::model::custom_property;
use crate::model::component_type::ComponentType;
use crate::model::source_ref::{self, SourceArtifactRef};
use serde_cyclonedx::cyclonedx::v_1_6::{
    Component, ComponentBuilder, ExternalReference, LicenseChoiceUrl, OrganizationalContact,
};
use std::borrow::{Borrow, BorrowMut};
use std::collections::BTreeSet;

/// Comment tag marking the external reference which holds the relative path
/// of the component binary.
pub const RELATIVE_PATH: &str = "relativePath";

const TYPE_WEBSITE: &str = "website";
const TYPE_VCS: &str = "vcs";

fn is_website_ref(r: &ExternalReference) -> bool {
    r.type_ == TYPE_WEBSITE
}

fn is_vcs_ref(r: &ExternalReference) -> bool {
    r.type_ == TYPE_VCS
}

fn is_relative_path_ref(r: &ExternalReference) -> bool {
    r.type_ == source_ref::TYPE_DISTRIBUTION && r.comment.as_deref() == Some(RELATIVE_PATH)
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Describes an entry in a Standard BOM compliant SBOM.
///
/// An entry wraps a CycloneDX [`Component`]. The wrapper is generic over
/// ownership, so the same accessors work on an owned entry being built up
/// and on a borrowed view handed out by a document.
#[derive(Debug)]
pub struct BomEntry<C = Component> {
    component: C,
}

impl BomEntry {
    /// Create a new entry. Component type and name are the only fields
    /// CycloneDX itself insists on.
    #[must_use]
    pub fn new(component_type: ComponentType, name: impl Into<String>) -> Self {
        let component = ComponentBuilder::default()
            .type_(component_type.type_name())
            .name(name.into())
            .build()
            .expect("component builder with type and name set cannot fail");
        Self { component }
    }

    /// Wrap an existing CycloneDX component.
    #[must_use]
    pub fn from_component(component: Component) -> Self {
        Self { component }
    }

    #[must_use]
    pub fn into_component(self) -> Component {
        self.component
    }
}

impl<C: Borrow<Component>> BomEntry<C> {
    pub(crate) fn view(component: C) -> Self {
        Self { component }
    }

    fn c(&self) -> &Component {
        self.component.borrow()
    }

    fn prop_get(&self, key: &str) -> Option<&str> {
        custom_props::get(self.c().properties.as_deref(), key)
    }

    fn ext_ref_get(&self, predicate: fn(&ExternalReference) -> bool) -> Option<&str> {
        ext_ref::get(self.c().external_references.as_deref(), predicate)
    }

    #[must_use]
    pub fn bom_ref(&self) -> Option<&str> {
        self.c().bom_ref.as_deref()
    }

    /// The component type, if it is one of the recognized type names.
    #[must_use]
    pub fn component_type(&self) -> Option<ComponentType> {
        ComponentType::from_type_name(&self.c().type_)
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.c().group.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.c().name
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.c().version.as_deref()
    }

    #[must_use]
    pub fn purl(&self) -> Option<&str> {
        self.c().purl.as_deref()
    }

    #[must_use]
    pub fn cpe(&self) -> Option<&str> {
        self.c().cpe.as_deref()
    }

    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.c().scope.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.c().description.as_deref()
    }

    #[must_use]
    pub fn copyright(&self) -> Option<&str> {
        self.c().copyright.as_deref()
    }

    #[must_use]
    pub fn authors(&self) -> Option<&[OrganizationalContact]> {
        self.c().authors.as_deref()
    }

    #[must_use]
    pub fn licenses(&self) -> Option<&LicenseChoiceUrl> {
        self.c().licenses.as_ref()
    }

    #[must_use]
    pub fn primary_language(&self) -> Option<&str> {
        self.prop_get(custom_property::PRIMARY_LANGUAGE)
    }

    /// Is this a direct dependency (`Some(true)`), a transitive one
    /// (`Some(false)`), or unrecorded (`None`)?
    #[must_use]
    pub fn is_direct_dependency(&self) -> Option<bool> {
        self.prop_get(custom_property::DIRECT_DEPENDENCY).map(parse_flag)
    }

    #[must_use]
    pub fn is_internal(&self) -> Option<bool> {
        self.prop_get(custom_property::INTERNAL).map(parse_flag)
    }

    #[must_use]
    pub fn legal_remark(&self) -> Option<&str> {
        self.prop_get(custom_property::LEGAL_REMARK)
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.prop_get(custom_property::FILENAME)
    }

    #[must_use]
    pub fn third_party_notices(&self) -> Option<&str> {
        self.prop_get(custom_property::THIRD_PARTY_NOTICES)
    }

    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.ext_ref_get(is_website_ref)
    }

    #[must_use]
    pub fn repo_url(&self) -> Option<&str> {
        self.ext_ref_get(is_vcs_ref)
    }

    /// The relative path of the component binary, without the `file:` URL
    /// scheme it is stored with.
    #[must_use]
    pub fn relative_path(&self) -> Option<&str> {
        self.ext_ref_get(is_relative_path_ref)
            .map(file_url::strip_file_url)
    }

    /// All source artifact references of this entry, as typed views.
    #[must_use]
    pub fn sources(&self) -> Vec<SourceArtifactRef<&ExternalReference>> {
        self.c()
            .external_references
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(source_ref::classify)
            .collect()
    }

    /// The relative paths of all local source archive copies.
    #[must_use]
    pub fn source_archives(&self) -> BTreeSet<String> {
        self.sources()
            .iter()
            .filter_map(SourceArtifactRef::as_local)
            .map(|local| local.relative_path().to_string())
            .collect()
    }

    #[must_use]
    pub fn has_source_archives(&self) -> bool {
        !self.source_archives().is_empty()
    }

    /// The remote download URLs of all source artifacts.
    #[must_use]
    pub fn source_download_urls(&self) -> BTreeSet<String> {
        self.sources()
            .iter()
            .filter_map(SourceArtifactRef::as_url)
            .map(|url_ref| url_ref.url().to_string())
            .collect()
    }

    #[must_use]
    pub fn has_source_download_urls(&self) -> bool {
        !self.source_download_urls().is_empty()
    }

    #[must_use]
    pub fn md5(&self) -> Option<&str> {
        hash_field::get(self.c().hashes.as_deref(), HashAlgorithm::Md5)
    }

    #[must_use]
    pub fn sha1(&self) -> Option<&str> {
        hash_field::get(self.c().hashes.as_deref(), HashAlgorithm::Sha1)
    }

    #[must_use]
    pub fn sha256(&self) -> Option<&str> {
        hash_field::get(self.c().hashes.as_deref(), HashAlgorithm::Sha256)
    }

    #[must_use]
    pub fn sha512(&self) -> Option<&str> {
        hash_field::get(self.c().hashes.as_deref(), HashAlgorithm::Sha512)
    }

    /// The underlying CycloneDX component.
    pub fn cyclonedx_component(&self) -> &Component {
        self.c()
    }
}

impl<C: BorrowMut<Component>> BomEntry<C> {
    fn c_mut(&mut self) -> &mut Component {
        self.component.borrow_mut()
    }

    fn prop_set(&mut self, key: &str, value: Option<&str>) {
        custom_props::set(&mut self.c_mut().properties, key, value);
    }

    fn ext_ref_set(
        &mut self,
        predicate: fn(&ExternalReference) -> bool,
        value: Option<&str>,
        init: impl FnOnce(&mut ExternalReference),
    ) {
        ext_ref::set(&mut self.c_mut().external_references, predicate, value, init);
    }

    pub fn set_bom_ref(&mut self, bom_ref: Option<&str>) {
        self.c_mut().bom_ref = bom_ref.map(str::to_string);
    }

    pub fn set_component_type(&mut self, component_type: ComponentType) {
        self.c_mut().type_ = component_type.type_name().to_string();
    }

    pub fn set_group(&mut self, group: Option<&str>) {
        self.c_mut().group = group.map(str::to_string);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.c_mut().name = name.into();
    }

    pub fn set_version(&mut self, version: Option<&str>) {
        self.c_mut().version = version.map(str::to_string);
    }

    pub fn set_purl(&mut self, purl: Option<&str>) {
        self.c_mut().purl = purl.map(str::to_string);
    }

    pub fn set_cpe(&mut self, cpe: Option<&str>) {
        self.c_mut().cpe = cpe.map(str::to_string);
    }

    pub fn set_scope(&mut self, scope: Option<&str>) {
        self.c_mut().scope = scope.map(str::to_string);
    }

    pub fn set_description(&mut self, description: Option<&str>) {
        self.c_mut().description = description.map(str::to_string);
    }

    pub fn set_copyright(&mut self, copyright: Option<&str>) {
        self.c_mut().copyright = copyright.map(str::to_string);
    }

    /// Add a copyright statement on a new line. A whitespace-only previous
    /// value is discarded.
    pub fn add_copyright(&mut self, copyright: &str) {
        let c = self.c_mut();
        let mut text = match c.copyright.as_deref() {
            Some(prev) if !prev.trim().is_empty() => format!("{prev}\n"),
            _ => String::new(),
        };
        text.push_str(copyright.trim());
        c.copyright = Some(text);
    }

    /// Add an author. Nothing happens when both name and email are `None`.
    pub fn add_author(&mut self, name: Option<&str>, email: Option<&str>) {
        if name.is_none() && email.is_none() {
            return;
        }
        let author = OrganizationalContact {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            ..OrganizationalContact::default()
        };
        self.c_mut().authors.get_or_insert_with(Vec::new).push(author);
    }

    pub fn set_authors(&mut self, authors: Option<Vec<OrganizationalContact>>) {
        self.c_mut().authors = authors;
    }

    pub fn set_licenses(&mut self, licenses: Option<LicenseChoiceUrl>) {
        self.c_mut().licenses = licenses;
    }

    pub fn set_primary_language(&mut self, language: Option<&str>) {
        self.prop_set(custom_property::PRIMARY_LANGUAGE, language);
    }

    pub fn set_direct_dependency(&mut self, direct: Option<bool>) {
        self.prop_set(
            custom_property::DIRECT_DEPENDENCY,
            direct.map(|d| if d { "true" } else { "false" }),
        );
    }

    pub fn set_internal(&mut self, internal: Option<bool>) {
        self.prop_set(
            custom_property::INTERNAL,
            internal.map(|i| if i { "true" } else { "false" }),
        );
    }

    pub fn set_legal_remark(&mut self, legal_remark: Option<&str>) {
        self.prop_set(custom_property::LEGAL_REMARK, legal_remark);
    }

    pub fn set_filename(&mut self, filename: Option<&str>) {
        self.prop_set(custom_property::FILENAME, filename);
    }

    pub fn set_third_party_notices(&mut self, notices: Option<&str>) {
        self.prop_set(custom_property::THIRD_PARTY_NOTICES, notices);
    }

    /// Add a third-party notice, separated from any previous notices by a
    /// blank line.
    pub fn add_third_party_notice(&mut self, notice: &str) {
        let mut text = match self.third_party_notices() {
            Some(prev) if !prev.trim().is_empty() => format!("{prev}\n\n"),
            _ => String::new(),
        };
        text.push_str(notice.trim());
        self.set_third_party_notices(Some(&text));
    }

    pub fn set_website(&mut self, website: Option<&str>) {
        self.ext_ref_set(is_website_ref, website, |r| {
            r.type_ = TYPE_WEBSITE.to_string();
        });
    }

    pub fn set_repo_url(&mut self, repo_url: Option<&str>) {
        self.ext_ref_set(is_vcs_ref, repo_url, |r| {
            r.type_ = TYPE_VCS.to_string();
        });
    }

    /// Store the relative path of the component binary as a `file:///` URL.
    /// Backslashes are normalized to forward slashes; a value containing a
    /// colon is stored untouched.
    pub fn set_relative_path(&mut self, relative_path: Option<&str>) {
        let normalized = relative_path.map(|p| {
            if p.contains(':') {
                p.to_string()
            } else {
                file_url::ensure_file_url(&p.replace('\\', "/"))
            }
        });
        self.ext_ref_set(is_relative_path_ref, normalized.as_deref(), |r| {
            r.type_ = source_ref::TYPE_DISTRIBUTION.to_string();
            r.comment = Some(RELATIVE_PATH.to_string());
        });
    }

    /// Attach a source artifact reference.
    pub fn add_source(&mut self, source: SourceArtifactRef) {
        self.c_mut()
            .external_references
            .get_or_insert_with(Vec::new)
            .push(source.into_ext_ref());
    }

    pub fn set_md5(&mut self, md5: Option<&str>) -> Result<()> {
        hash_field::set(&mut self.c_mut().hashes, HashAlgorithm::Md5, md5)
    }

    pub fn set_sha1(&mut self, sha1: Option<&str>) -> Result<()> {
        hash_field::set(&mut self.c_mut().hashes, HashAlgorithm::Sha1, sha1)
    }

    pub fn set_sha256(&mut self, sha256: Option<&str>) -> Result<()> {
        hash_field::set(&mut self.c_mut().hashes, HashAlgorithm::Sha256, sha256)
    }

    pub fn set_sha512(&mut self, sha512: Option<&str>) -> Result<()> {
        hash_field::set(&mut self.c_mut().hashes, HashAlgorithm::Sha512, sha512)
    }

    /// Mutable access to the underlying CycloneDX component.
    pub fn cyclonedx_component_mut(&mut self) -> &mut Component {
        self.c_mut()
    }
}
