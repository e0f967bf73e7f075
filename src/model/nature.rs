//! Possible values of the `siemens:sbomNature` property.

/// The nature of an entire SBOM document.
///
/// Mostly relevant for package ecosystems that distinguish binary from
/// source packages, like Debian or RPM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SbomNature {
    /// The SBOM contains binary components.
    Binary,
    /// The SBOM contains source components.
    Source,
}

impl SbomNature {
    /// The lowercase property value for this nature.
    #[must_use]
    pub fn property_value(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Source => "source",
        }
    }

    /// Case-insensitive parse. Unmatched strings yield `None`.
    #[must_use]
    pub fn parse_nature(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("binary") {
            Some(Self::Binary)
        } else if value.eq_ignore_ascii_case("source") {
            Some(Self::Source)
        } else {
            None
        }
    }
}
