//! The custom property keys supported in CycloneDX components as per the
//! [Siemens property taxonomy](https://github.com/siemens/cyclonedx-property-taxonomy)
//! for CycloneDX.
//!
//! All keys are unqualified here; the codec prefixes the vendor namespace.

/// Flag indicating whether the component is a direct dependency (`true`) or
/// a transitive dependency (`false`).
pub const DIRECT_DEPENDENCY: &str = "direct";

/// The simple file name of the component binary, without path.
pub const FILENAME: &str = "filename";

/// Flag indicating whether the component is an internal ("in-house")
/// component (`true`) or not (`false`).
pub const INTERNAL: &str = "internal";

/// Pass-through legal text.
pub const LEGAL_REMARK: &str = "legalRemark";

/// The primary programming language in which the component is written.
pub const PRIMARY_LANGUAGE: &str = "primaryLanguage";

/// The [Standard BOM profile](https://sbom.siemens.io/latest/profiles.html)
/// declared for this SBOM. Used on SBOM level (`metadata/properties`).
pub const PROFILE: &str = "profile";

/// The nature of the entire SBOM document: `binary` or `source`.
pub const SBOM_NATURE: &str = "sbomNature";

/// Multi-paragraph third-party notices text.
pub const THIRD_PARTY_NOTICES: &str = "thirdPartyNotices";

/// Flag (`true`/`false`) indicating whether the VCS workspace was clean when
/// the SBOM was created. Used on SBOM level.
pub const VCS_CLEAN: &str = "vcsClean";

/// The most recent VCS revision, for example a Git commit hash. Together
/// with [`VCS_CLEAN`] this allows accurate reproducibility of the SBOM.
/// Used on SBOM level.
pub const VCS_REVISION: &str = "vcsRevision";
