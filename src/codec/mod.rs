//! Encode/decode helpers between typed fields and their CycloneDX storage.
//!
//! CycloneDX has no native slots for some of the data the Standard BOM
//! convention carries, so this layer packs it into what the schema does
//! offer: property lists, hash lists, external references, and text blobs
//! in comment fields.

pub mod custom_props;
pub mod ext_ref;
pub mod file_url;
pub mod hash_field;
pub mod keyed_list;
pub mod string_map;

pub use custom_props::CUSTOM_PROPERTY_NAMESPACE;
pub use hash_field::HashAlgorithm;
pub use string_map::MapDecodeError;
