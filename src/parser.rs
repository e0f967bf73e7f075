//! Reading and writing Standard BOM files.
//!
//! Writing goes through a small pipeline around the JSON generator: a few
//! fields are escaped in the object graph beforehand and patched in the
//! generated text afterwards, because their exact byte representation
//! matters to downstream consumers. The output is deterministic, so saving
//! an unchanged document reproduces the file byte for byte.

use crate::error::{ParseErrorKind, Result, StandardBomError};
use crate::model::document::StandardBom;
use crate::sort;
use regex::Regex;
use serde_cyclonedx::cyclonedx::v_1_6::CycloneDx;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const NEWLINE_TOKEN: &str = "§LINEBREAK§";
const PURL_ESCAPE: &str = "http://PURL-ESCAPE/";
const OUTPUT_SPEC_VERSION: &str = "1.6";
const SCHEMA_URL: &str = "http://cyclonedx.org/schema/bom-1.6.schema.json";

fn newline_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\r?\n").expect("static newline pattern"))
}

/// Parse the given file as a Standard BOM.
///
/// A missing file is reported as [`StandardBomError::NotFound`], distinct
/// from other I/O failures.
pub fn parse_file(path: impl AsRef<Path>) -> Result<StandardBom> {
    let path = path.as_ref();
    debug!("parsing Standard BOM: {}", path.display());
    let bytes = fs::read(path).map_err(|e| StandardBomError::io(path, e))?;
    parse_bytes(&bytes, &path.display().to_string())
}

/// Parse an in-memory JSON document as a Standard BOM.
///
/// `context` names the input in error messages, typically a file name.
pub fn parse_bytes(bytes: &[u8], context: &str) -> Result<StandardBom> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        StandardBomError::parse(context, ParseErrorKind::InvalidJson(e.to_string()))
    })?;
    match value.get("bomFormat").and_then(serde_json::Value::as_str) {
        Some("CycloneDX") => {}
        Some(other) => {
            return Err(StandardBomError::parse(
                context,
                ParseErrorKind::NotCycloneDx(format!("unexpected bomFormat: {other}")),
            ));
        }
        None => {
            return Err(StandardBomError::parse(
                context,
                ParseErrorKind::NotCycloneDx("missing bomFormat attribute".to_string()),
            ));
        }
    }
    let bom: CycloneDx = serde_json::from_value(value).map_err(|e| {
        StandardBomError::parse(context, ParseErrorKind::NotCycloneDx(e.to_string()))
    })?;
    debug!("successfully parsed Standard BOM ({} bytes)", bytes.len());
    Ok(StandardBom::from_cyclonedx(bom))
}

/// Store the given Standard BOM in a file.
///
/// The document is modified slightly in the process, so save it last.
pub fn save(bom: &mut StandardBom, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = stringify(bom)?;
    fs::write(path, json).map_err(|e| StandardBomError::io(path, e))?;
    debug!("BOM stored in file: {}", path.display());
    Ok(())
}

/// Convert the given Standard BOM to its JSON text representation.
///
/// The document is modified slightly in the process (custom properties are
/// sorted, some field contents rewritten), so do this last.
pub fn stringify(bom: &mut StandardBom) -> Result<String> {
    escape_component_newlines(bom);
    escape_ext_ref_purls(bom);

    let cyclonedx = bom.cyclonedx_bom_mut();
    if let Some(components) = cyclonedx.components.as_mut() {
        sort::sort_custom_properties(components);
    }
    // the generator would emit "services": [] for an empty list
    if cyclonedx.services.as_ref().is_some_and(Vec::is_empty) {
        cyclonedx.services = None;
    }
    // output is always 1.6, regardless of what was parsed
    cyclonedx.spec_version = OUTPUT_SPEC_VERSION.to_string();
    cyclonedx.schema = Some(SCHEMA_URL.to_string());

    let json = serde_json::to_string_pretty(cyclonedx)
        .map_err(|e| StandardBomError::serialization("failed to convert output to JSON", e))?;

    let json = unescape_newline_tokens(&json);
    let mut json = restore_ext_ref_purls(&json);
    json.push('\n');
    Ok(json)
}

/// Replace literal line breaks in copyright and third-party notice texts
/// with a token that survives the generator untouched.
fn escape_component_newlines(bom: &mut StandardBom) {
    let pattern = newline_pattern();
    for mut entry in bom.components_mut() {
        let copyright = entry
            .copyright()
            .filter(|text| pattern.is_match(text))
            .map(|text| pattern.replace_all(text, NEWLINE_TOKEN).into_owned());
        if let Some(escaped) = copyright {
            entry.set_copyright(Some(&escaped));
        }
        let notices = entry
            .third_party_notices()
            .filter(|text| pattern.is_match(text))
            .map(|text| pattern.replace_all(text, NEWLINE_TOKEN).into_owned());
        if let Some(escaped) = notices {
            entry.set_third_party_notices(Some(&escaped));
        }
    }
}

/// Disguise purls in document-level external references as HTTP URLs.
/// Purls are in fact legal there, but strict URL validators reject them.
fn escape_ext_ref_purls(bom: &mut StandardBom) {
    if let Some(refs) = bom.cyclonedx_bom_mut().external_references.as_mut() {
        for ext_ref in refs {
            let escaped = ext_ref
                .url
                .as_str()
                .and_then(|url| url.strip_prefix("pkg:"))
                .map(|rest| format!("{PURL_ESCAPE}{rest}"));
            if let Some(url) = escaped {
                ext_ref.url = serde_json::Value::String(url);
            }
        }
    }
}

fn unescape_newline_tokens(json: &str) -> String {
    json.replace(NEWLINE_TOKEN, "\\n")
}

fn restore_ext_ref_purls(json: &str) -> String {
    json.replace(PURL_ESCAPE, "pkg:")
}
