//! Lookup helpers for the maps which CycloneDX confusingly models as lists.
//!
//! Hashes and custom properties are JSON arrays of key/value records. This
//! module treats such a list as a map: find the first entry for a key, or
//! drop every entry for a key. No validation happens here; that is the job
//! of the codecs layered on top.

use crate::codec::hash_field::HashAlgorithm;
use serde_cyclonedx::cyclonedx::v_1_6::{Hash, Property};

/// A list whose elements carry a key and a value, addressed through
/// selector functions.
pub struct KeyedList<T: 'static> {
    key: fn(&T) -> Option<&str>,
    value: fn(&T) -> Option<&str>,
}

/// Keyed view of a CycloneDX hash list (key = algorithm tag).
pub const HASHES: KeyedList<Hash> = KeyedList::new(
    |hash| Some(HashAlgorithm::from_cyclonedx(&hash.alg).spec_name()),
    |hash| Some(hash.content.as_str()),
);

/// Keyed view of a CycloneDX property list (key = property name).
pub const PROPERTIES: KeyedList<Property> =
    KeyedList::new(|prop| Some(prop.name.as_str()), |prop| prop.value.as_deref());

impl<T> KeyedList<T> {
    pub const fn new(key: fn(&T) -> Option<&str>, value: fn(&T) -> Option<&str>) -> Self {
        Self { key, value }
    }

    /// Value of the first entry whose key equals `key`, if any.
    pub fn first<'a>(&self, list: Option<&'a [T]>, key: &str) -> Option<&'a str> {
        list?
            .iter()
            .find(|elem| (self.key)(elem) == Some(key))
            .and_then(|elem| (self.value)(elem))
    }

    /// Drop every entry whose key equals `key`.
    pub fn remove_all(&self, list: Option<&mut Vec<T>>, key: &str) {
        if let Some(list) = list {
            list.retain(|elem| (self.key)(elem) != Some(key));
        }
    }
}
