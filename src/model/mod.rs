//! The typed Standard BOM object model.
//!
//! Every type in here is a thin wrapper around a CycloneDX structure from
//! `serde_cyclonedx`. The wrappers never copy data out of the document; they
//! read and write the underlying structures in place, so the CycloneDX graph
//! stays the single source of truth.

pub mod component_type;
pub mod custom_property;
pub mod document;
pub mod entry;
pub mod external_component;
pub mod nature;
pub mod source_ref;

pub use component_type::ComponentType;
pub use document::{StandardBom, SPEC_NAME};
pub use entry::{BomEntry, RELATIVE_PATH};
pub use external_component::{ExternalComponent, UNKNOWN_PURL};
pub use nature::SbomNature;
pub use source_ref::{
    SourceArtifactRef, SourceArtifactRefLocal, SourceArtifactRefUrl, SOURCE_ARCHIVE_LOCAL,
};
