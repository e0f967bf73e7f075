//! **A library for reading and writing Standard BOM documents.**
//!
//! [Standard BOM](https://sbom.siemens.io/) is a Siemens convention for
//! software bills of materials built entirely on
//! [CycloneDX](https://cyclonedx.org/): every Standard BOM file is a valid
//! CycloneDX 1.6 document, and every CycloneDX consumer can read one. This
//! crate adds the typed layer on top of the generic `serde_cyclonedx`
//! structures, so that convention fields (custom properties in the `siemens`
//! namespace, tagged external references, encoded comment maps) can be used
//! through ordinary accessors instead of string matching.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The typed object model. [`StandardBom`] wraps a complete
//!   document, [`BomEntry`] wraps one component, and the remaining wrappers
//!   cover source artifact references and external components. None of them
//!   copy data: they read and write the underlying CycloneDX graph in place.
//! - **[`parser`]**: Reading and writing files. Writing is deterministic,
//!   so an unchanged document saves byte for byte.
//! - **[`codec`]**: The encoding helpers the model is built from, public for
//!   tools that need to interoperate on the raw representation.
//! - **[`sort`]**: Canonical orderings for entries and custom properties.
//!
//! ## Getting Started
//!
//! ```no_run
//! use standard_bom::{parser, BomEntry, ComponentType, StandardBom};
//!
//! fn main() -> standard_bom::Result<()> {
//!     let mut bom = StandardBom::new();
//!     bom.set_timestamp(chrono::Utc::now());
//!
//!     let mut entry = BomEntry::new(ComponentType::Library, "commons-lang3");
//!     entry.set_group(Some("org.apache.commons"));
//!     entry.set_version(Some("3.14.0"));
//!     entry.set_purl(Some("pkg:maven/org.apache.commons/commons-lang3@3.14.0"));
//!     entry.set_sha1(Some("e969f7c53f1e2ba4d3b5d8f9f47b3d29c7034e73"))?;
//!     bom.add_component(entry);
//!
//!     parser::save(&mut bom, "bom.cdx.json")?;
//!     Ok(())
//! }
//! ```
//!
//! Reading works the other way around:
//!
//! ```no_run
//! use standard_bom::parser;
//!
//! fn main() -> standard_bom::Result<()> {
//!     let bom = parser::parse_file("bom.cdx.json")?;
//!     for entry in bom.components() {
//!         println!("{} {}", entry.name(), entry.version().unwrap_or("?"));
//!     }
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]

pub mod codec;
pub mod error;
pub mod model;
pub mod parser;
pub mod sort;
pub mod version;

pub use codec::{HashAlgorithm, CUSTOM_PROPERTY_NAMESPACE};
pub use error::{ParseErrorKind, Result, StandardBomError};
pub use model::{
    BomEntry, ComponentType, ExternalComponent, SbomNature, SourceArtifactRef,
    SourceArtifactRefLocal, SourceArtifactRefUrl, StandardBom, RELATIVE_PATH,
    SOURCE_ARCHIVE_LOCAL, SPEC_NAME, UNKNOWN_PURL,
};
pub use version::VersionInfo;
