//! The typed view onto a complete Standard BOM document.

use crate::codec::custom_props;
use crate::codec::ext_ref::new_ext_ref;
use crate::model::custom_property;
use crate::model::entry::BomEntry;
use crate::model::external_component::{self, ExternalComponent};
use crate::model::nature::SbomNature;
use crate::version::VersionInfo;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_cyclonedx::cyclonedx::v_1_6::{
    Component, CycloneDx, CycloneDxBuilder, CycloneDxDefinitions, Dependency, ExternalReference,
    Metadata, MetadataTools, MetadataToolsVariant1, StandardBuilder, Tool,
};

/// Name of the format specification, as recorded in `definitions.standards`.
pub const SPEC_NAME: &str = "Standard BOM";

const SPEC_OWNER: &str = "Siemens AG";

const TYPE_WEBSITE: &str = "website";

/// Main wrapper for the complete Standard BOM JSON structure.
///
/// Owns a CycloneDX document and hands out typed views onto its parts.
/// See the [format description](https://sbom.siemens.io/latest/format.html).
#[derive(Debug)]
pub struct StandardBom {
    bom: CycloneDx,
}

impl StandardBom {
    /// Create an empty document declaring the Standard BOM format and
    /// stamping this library as the producing tool.
    #[must_use]
    pub fn new() -> Self {
        let info = VersionInfo::get();
        let bom = CycloneDxBuilder::default()
            .bom_format("CycloneDX")
            .spec_version("1.6")
            .version(1)
            .definitions(spec_descriptor(info))
            .metadata(Metadata {
                tools: Some(library_descriptor(info)),
                ..Metadata::default()
            })
            .build()
            .expect("all builder fields have defaults");
        Self { bom }
    }

    /// Wrap an existing CycloneDX document.
    #[must_use]
    pub fn from_cyclonedx(bom: CycloneDx) -> Self {
        Self { bom }
    }

    /// The document timestamp. An absent or unreadable timestamp reads as
    /// the Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.bom
            .metadata
            .as_ref()
            .and_then(|m| m.timestamp.as_deref())
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.metadata_mut().timestamp =
            Some(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    #[must_use]
    pub fn serial_number(&self) -> Option<&str> {
        self.bom.serial_number.as_deref()
    }

    pub fn set_serial_number(&mut self, serial_number: Option<&str>) {
        self.bom.serial_number = serial_number.map(str::to_string);
    }

    /// Read-only entry views onto all components.
    #[must_use]
    pub fn components(&self) -> Vec<BomEntry<&Component>> {
        self.bom
            .components
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(BomEntry::view)
            .collect()
    }

    /// Mutable entry views onto all components.
    pub fn components_mut(&mut self) -> Vec<BomEntry<&mut Component>> {
        self.bom
            .components
            .as_mut()
            .map(|list| list.iter_mut().map(BomEntry::view).collect())
            .unwrap_or_default()
    }

    pub fn add_component(&mut self, entry: BomEntry) {
        self.bom
            .components
            .get_or_insert_with(Vec::new)
            .push(entry.into_component());
    }

    #[must_use]
    pub fn dependencies(&self) -> Option<&[Dependency]> {
        self.bom.dependencies.as_deref()
    }

    pub fn add_dependency(&mut self, dependency: Dependency) {
        self.bom
            .dependencies
            .get_or_insert_with(Vec::new)
            .push(dependency);
    }

    pub fn set_dependencies(&mut self, dependencies: Option<Vec<Dependency>>) {
        self.bom.dependencies = dependencies;
    }

    /// Views onto all document-level references which encode external
    /// components. Other references are not included.
    #[must_use]
    pub fn external_components(&self) -> Vec<ExternalComponent<&ExternalReference>> {
        self.bom
            .external_references
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|r| external_component::is_external_component(r))
            .map(ExternalComponent::view)
            .collect()
    }

    pub fn add_external_component(&mut self, external: ExternalComponent) {
        self.bom
            .external_references
            .get_or_insert_with(Vec::new)
            .push(external.into_ext_ref());
    }

    /// The declared Standard BOM profile, for example `clearing`.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.meta_prop(custom_property::PROFILE)
    }

    pub fn set_profile(&mut self, profile: Option<&str>) {
        self.set_meta_prop(custom_property::PROFILE, profile);
    }

    #[must_use]
    pub fn sbom_nature(&self) -> Option<SbomNature> {
        self.meta_prop(custom_property::SBOM_NATURE)
            .and_then(SbomNature::parse_nature)
    }

    pub fn set_sbom_nature(&mut self, nature: Option<SbomNature>) {
        self.set_meta_prop(
            custom_property::SBOM_NATURE,
            nature.map(SbomNature::property_value),
        );
    }

    /// The Standard BOM version declared in this document, or `None` when
    /// the document does not carry a recognizable declaration.
    #[must_use]
    pub fn standard_bom_version(&self) -> Option<&str> {
        self.version_from_standards()
            .or_else(|| self.version_from_tools())
    }

    fn version_from_standards(&self) -> Option<&str> {
        self.bom
            .definitions
            .as_ref()
            .and_then(|d| d.standards.as_deref())
            .into_iter()
            .flatten()
            .find(|s| {
                s.name.as_deref() == Some(SPEC_NAME) && s.owner.as_deref() == Some(SPEC_OWNER)
            })
            .and_then(|s| s.version.as_deref())
    }

    /// Version 2 documents declare the format via an entry in the
    /// deprecated `metadata.tools` array shape.
    fn version_from_tools(&self) -> Option<&str> {
        let info = VersionInfo::get();
        match self.bom.metadata.as_ref()?.tools.as_ref()? {
            MetadataTools::Variant1(tools) => tools
                .iter()
                .find(|t| {
                    t.name.as_deref() == Some(info.spec_tool_name.as_str())
                        && t.vendor.as_deref() == Some(SPEC_OWNER)
                })
                .and_then(|t| t.version.as_deref()),
            MetadataTools::Variant0(_) => None,
        }
    }

    /// The underlying CycloneDX document.
    pub fn cyclonedx_bom(&self) -> &CycloneDx {
        &self.bom
    }

    /// Mutable access to the underlying CycloneDX document.
    pub fn cyclonedx_bom_mut(&mut self) -> &mut CycloneDx {
        &mut self.bom
    }

    #[must_use]
    pub fn into_cyclonedx(self) -> CycloneDx {
        self.bom
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        self.bom.metadata.get_or_insert_with(Metadata::default)
    }

    fn meta_prop(&self, key: &str) -> Option<&str> {
        self.bom
            .metadata
            .as_ref()
            .and_then(|m| custom_props::get(m.properties.as_deref(), key))
    }

    fn set_meta_prop(&mut self, key: &str, value: Option<&str>) {
        custom_props::set(&mut self.metadata_mut().properties, key, value);
    }
}

impl Default for StandardBom {
    fn default() -> Self {
        Self::new()
    }
}

/// The `definitions.standards` entry declaring the Standard BOM format.
fn spec_descriptor(info: &VersionInfo) -> CycloneDxDefinitions {
    let mut website = new_ext_ref(info.spec_website.clone());
    website.type_ = TYPE_WEBSITE.to_string();
    let standard = StandardBuilder::default()
        .bom_ref(info.spec_tool_name.clone())
        .name(SPEC_NAME)
        .version(info.spec_version.clone())
        .description("Siemens SBOM Standard")
        .owner(SPEC_OWNER)
        .external_references(vec![website])
        .build()
        .expect("all builder fields have defaults");
    CycloneDxDefinitions {
        standards: Some(vec![standard]),
    }
}

/// The `metadata.tools` entry identifying this library.
fn library_descriptor(info: &VersionInfo) -> MetadataTools {
    MetadataTools::Variant1(MetadataToolsVariant1::from(vec![Tool {
        vendor: Some(SPEC_OWNER.to_string()),
        name: Some(info.library_name.clone()),
        version: Some(info.library_version.clone()),
        ..Tool::default()
    }]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::component_type::ComponentType;
    use serde_cyclonedx::cyclonedx::v_1_6::DependencyBuilder;

    #[test]
    fn test_new_document_declares_the_format() {
        let bom = StandardBom::new();
        assert_eq!(bom.standard_bom_version(), Some(VersionInfo::get().spec_version.as_str()));
        assert_eq!(bom.cyclonedx_bom().spec_version, "1.6");
    }

    #[test]
    fn test_version_falls_back_to_legacy_tools_declaration() {
        let mut bom = StandardBom::new();
        let cyclonedx = bom.cyclonedx_bom_mut();
        cyclonedx.definitions = None;
        cyclonedx.metadata = Some(Metadata {
            tools: Some(MetadataTools::Variant1(vec![Tool {
                vendor: Some("Siemens AG".to_string()),
                name: Some("standard-bom".to_string()),
                version: Some("2.0.0".to_string()),
                ..Tool::default()
            }])),
            ..Metadata::default()
        });
        assert_eq!(bom.standard_bom_version(), Some("2.0.0"));
    }

    #[test]
    fn test_timestamp_defaults_to_epoch() {
        let bom = StandardBom::new();
        assert_eq!(bom.timestamp(), Utc.timestamp_opt(0, 0).unwrap());
    }

    #[test]
    fn test_timestamp_round_trip() {
        let mut bom = StandardBom::new();
        let ts = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
        bom.set_timestamp(ts);
        assert_eq!(bom.timestamp(), ts);
        let stored = bom
            .cyclonedx_bom()
            .metadata
            .as_ref()
            .and_then(|m| m.timestamp.as_deref());
        assert_eq!(stored, Some("2024-05-17T09:30:00Z"));
    }

    #[test]
    fn test_components_round_trip() {
        let mut bom = StandardBom::new();
        let mut entry = BomEntry::new(ComponentType::Library, "liba");
        entry.set_version(Some("1.0"));
        bom.add_component(entry);

        let components = bom.components();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name(), "liba");
        assert_eq!(components[0].version(), Some("1.0"));
    }

    #[test]
    fn test_components_mut_edits_in_place() {
        let mut bom = StandardBom::new();
        bom.add_component(BomEntry::new(ComponentType::Library, "liba"));
        for mut entry in bom.components_mut() {
            entry.set_primary_language(Some("Rust"));
        }
        assert_eq!(bom.components()[0].primary_language(), Some("Rust"));
    }

    #[test]
    fn test_profile_and_nature_live_in_metadata_properties() {
        let mut bom = StandardBom::new();
        bom.set_profile(Some("clearing"));
        bom.set_sbom_nature(Some(SbomNature::Source));

        assert_eq!(bom.profile(), Some("clearing"));
        assert_eq!(bom.sbom_nature(), Some(SbomNature::Source));

        let props = bom
            .cyclonedx_bom()
            .metadata
            .as_ref()
            .and_then(|m| m.properties.as_deref())
            .unwrap();
        assert!(props.iter().any(|p| p.name == "siemens:profile"));
        assert!(props.iter().any(|p| p.name == "siemens:sbomNature"));
    }

    #[test]
    fn test_external_components_are_filtered() {
        let mut bom = StandardBom::new();
        let mut external = ExternalComponent::new();
        external.set_url(Some("pkg:maven/org.example/ext@2.0")).unwrap();
        bom.add_external_component(external);

        let mut stray = new_ext_ref("https://example.com");
        stray.type_ = TYPE_WEBSITE.to_string();
        bom.cyclonedx_bom_mut()
            .external_references
            .get_or_insert_with(Vec::new)
            .push(stray);

        let externals = bom.external_components();
        assert_eq!(externals.len(), 1);
        assert_eq!(externals[0].url(), "pkg:maven/org.example/ext@2.0");
    }

    #[test]
    fn test_dependencies_pass_through() {
        let mut bom = StandardBom::new();
        bom.add_dependency(
            DependencyBuilder::default()
                .ref_("pkg:maven/a/a@1")
                .depends_on(vec!["pkg:maven/b/b@1".to_string()])
                .build()
                .unwrap(),
        );
        let deps = bom.dependencies().unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].ref_, "pkg:maven/a/a@1");
    }
}
