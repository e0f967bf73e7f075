//! Logical fields stored as typed entries in an external-reference list.
//!
//! A logical field (website, VCS URL, relative path, ...) is identified by a
//! discriminator predicate over reference type and comment tag. Reading
//! returns the URL of the first match; writing removes every match and, for
//! a non-blank value, appends a freshly initialized reference.

use serde_cyclonedx::cyclonedx::v_1_6::ExternalReference;

/// Construct a reference with the given URL and no type or comment yet.
/// Callers apply their discriminator tags via the `init` mutator of [`set`].
pub(crate) fn new_ext_ref(url: impl Into<String>) -> ExternalReference {
    ExternalReference {
        comment: None,
        hashes: None,
        type_: String::new(),
        url: serde_json::Value::String(url.into()),
    }
}

/// The URL as a string. The schema allows any JSON value here; a non-string
/// value reads as empty.
pub(crate) fn url_str(ext_ref: &ExternalReference) -> &str {
    ext_ref.url.as_str().unwrap_or_default()
}

pub(crate) fn set_url_str(ext_ref: &mut ExternalReference, url: impl Into<String>) {
    ext_ref.url = serde_json::Value::String(url.into());
}

/// URL of the first reference matching the discriminator predicate.
pub fn get<'a>(
    refs: Option<&'a [ExternalReference]>,
    predicate: impl Fn(&ExternalReference) -> bool,
) -> Option<&'a str> {
    refs?
        .iter()
        .find(|r| predicate(r))
        .and_then(|r| r.url.as_str())
}

/// Replace the logical field selected by the discriminator predicate.
///
/// Every matching reference is removed. If `url` is non-blank, a new
/// reference with the trimmed URL is initialized through `init` (which sets
/// type and comment tag) and appended. An empty list is normalized back to
/// absent.
pub fn set(
    refs: &mut Option<Vec<ExternalReference>>,
    predicate: impl Fn(&ExternalReference) -> bool,
    url: Option<&str>,
    init: impl FnOnce(&mut ExternalReference),
) {
    if let Some(list) = refs.as_mut() {
        list.retain(|r| !predicate(r));
    }
    if let Some(url) = url {
        let trimmed = url.trim();
        if !trimmed.is_empty() {
            let mut ext_ref = new_ext_ref(trimmed);
            init(&mut ext_ref);
            refs.get_or_insert_with(Vec::new).push(ext_ref);
        }
    }
    if refs.as_ref().is_some_and(Vec::is_empty) {
        *refs = None;
    }
}
