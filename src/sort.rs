//! Orderings for BOM entries and custom properties.
//!
//! The entry order is meant for sorting only; it is not a duplicate
//! criterion. The property order exists so that serialized documents come
//! out in a predictable order.

use crate::model::entry::BomEntry;
use serde_cyclonedx::cyclonedx::v_1_6::{Component, Property};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Compare two properties by name, then by value. Absent values sort last.
#[must_use]
pub fn compare_properties(a: &Property, b: &Property) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| nulls_last(a.value.as_deref(), b.value.as_deref()))
}

/// Compare two BOM entries by type, group, name, filename, version and SHA-1,
/// in that order. Absent values sort last within each criterion; entries
/// without a recognized type sort after all typed entries.
#[must_use]
pub fn compare_entries<C: Borrow<Component>>(a: &BomEntry<C>, b: &BomEntry<C>) -> Ordering {
    compare_types(a, b)
        .then_with(|| nulls_last(a.group(), b.group()))
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| nulls_last(a.filename(), b.filename()))
        .then_with(|| nulls_last(a.version(), b.version()))
        .then_with(|| nulls_last(a.sha1(), b.sha1()))
}

/// Sort every component's custom property list in place.
pub fn sort_custom_properties(components: &mut [Component]) {
    for component in components {
        if let Some(props) = component.properties.as_mut() {
            props.sort_by(compare_properties);
        }
    }
}

fn compare_types<C: Borrow<Component>>(a: &BomEntry<C>, b: &BomEntry<C>) -> Ordering {
    match (a.component_type(), b.component_type()) {
        (Some(ta), Some(tb)) => ta.cmp(&tb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
