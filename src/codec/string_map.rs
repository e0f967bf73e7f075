//! Serializes an ordered string-to-string map into a single string value.
//!
//! The wire form is the classic Java `.properties` text encoding (newline
//! separated `key=value` pairs with backslash escaping and `\uXXXX` unicode
//! escapes), because existing test fixtures and cross-tool consumers expect
//! this exact dialect. Keys are always sorted on output so that serialized
//! documents are byte-for-byte reproducible.
//!
//! Decoding failures are non-fatal by design: foreign or hand-edited blobs
//! must never block reading the rest of the document, so a malformed blob is
//! treated as an empty map and logged as a warning.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use thiserror::Error;

/// A blob that does not parse under the `.properties` escaping grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed properties text: {0}")]
pub struct MapDecodeError(pub String);

/// Look up `key` in the encoded `blob`.
///
/// A missing or undecodable blob reads as an empty map.
pub fn get(blob: Option<&str>, key: &str) -> Option<String> {
    decode_lossy(blob).remove(key)
}

/// Remove any existing entry for `key`, then insert the trimmed `value` if it
/// is non-blank. Returns the re-encoded blob, or `None` if the map ended up
/// empty.
pub fn set(blob: Option<&str>, key: &str, value: Option<&str>) -> Option<String> {
    let mut map = decode_lossy(blob);
    map.remove(key);
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            map.insert(key.to_string(), trimmed.to_string());
        }
    }
    encode(&map)
}

/// Well-formedness probe: does `blob` decode under the escaping grammar?
pub fn is_decodable(blob: &str) -> bool {
    decode(blob).is_ok()
}

/// Decode a blob, swallowing malformed input as an empty map.
pub(crate) fn decode_lossy(blob: Option<&str>) -> BTreeMap<String, String> {
    match blob {
        None => BTreeMap::new(),
        Some(text) => decode(text).unwrap_or_else(|_| {
            tracing::warn!("comment is not recognized as encoded by standard-bom: {text}");
            BTreeMap::new()
        }),
    }
}

/// Encode a map as sorted `key=value` lines. An empty map encodes as `None`,
/// not as an empty string.
pub(crate) fn encode(map: &BTreeMap<String, String>) -> Option<String> {
    if map.is_empty() {
        return None;
    }
    let lines: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{}={}", escape(key, true), escape(value, false)))
        .collect();
    Some(lines.join("\n"))
}

/// Decode `.properties` text into a map.
pub(crate) fn decode(text: &str) -> Result<BTreeMap<String, String>, MapDecodeError> {
    let mut map = BTreeMap::new();
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        let line = line.trim_start_matches([' ', '\t', '\x0c']);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        // join continuation lines (odd number of trailing backslashes)
        let mut logical = line.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start_matches([' ', '\t', '\x0c'])),
                None => break,
            }
        }
        let (key, value) = split_key_value(&logical);
        map.insert(unescape(key)?, unescape(value)?);
    }
    Ok(map)
}

/// A logical line continues when it ends with an odd number of backslashes.
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped `=`, `:` or whitespace.
/// The returned halves are still escaped.
fn split_key_value(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut idx = 0;
    let mut escaped = false;
    let mut sep = None;
    while idx < bytes.len() {
        let b = bytes[idx];
        if escaped {
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else if b == b'=' || b == b':' || b == b' ' || b == b'\t' || b == b'\x0c' {
            sep = Some(idx);
            break;
        }
        idx += 1;
    }
    let Some(sep) = sep else {
        return (line, "");
    };
    let key = &line[..sep];
    let mut rest = &line[sep..];
    // skip whitespace, then at most one '=' or ':', then more whitespace
    rest = rest.trim_start_matches([' ', '\t', '\x0c']);
    if rest.starts_with(['=', ':']) {
        rest = rest[1..].trim_start_matches([' ', '\t', '\x0c']);
    }
    (key, rest)
}

/// Reverse the backslash escaping of one key or value.
fn unescape(s: &str) -> Result<String, MapDecodeError> {
    let mut out = String::with_capacity(s.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out, s)?;
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = chars
                        .next()
                        .and_then(|d| d.to_digit(16))
                        .ok_or_else(|| MapDecodeError(format!("malformed \\uxxxx encoding in {s:?}")))?;
                    code = code * 16 + digit;
                }
                units.push(code as u16);
            }
            Some('t') => {
                flush_units(&mut units, &mut out, s)?;
                out.push('\t');
            }
            Some('n') => {
                flush_units(&mut units, &mut out, s)?;
                out.push('\n');
            }
            Some('r') => {
                flush_units(&mut units, &mut out, s)?;
                out.push('\r');
            }
            Some('f') => {
                flush_units(&mut units, &mut out, s)?;
                out.push('\x0c');
            }
            Some(other) => {
                flush_units(&mut units, &mut out, s)?;
                out.push(other);
            }
            None => break, // dangling backslash at end of logical line
        }
    }
    flush_units(&mut units, &mut out, s)?;
    Ok(out)
}

/// Turn accumulated `\uXXXX` UTF-16 code units into characters. An unpaired
/// surrogate is a decode failure.
fn flush_units(units: &mut Vec<u16>, out: &mut String, context: &str) -> Result<(), MapDecodeError> {
    if units.is_empty() {
        return Ok(());
    }
    let decoded: Result<String, _> = char::decode_utf16(units.drain(..)).collect();
    match decoded {
        Ok(s) => {
            out.push_str(&s);
            Ok(())
        }
        Err(_) => Err(MapDecodeError(format!(
            "unpaired surrogate in \\uxxxx encoding in {context:?}"
        ))),
    }
}

/// Apply the `.properties` escaping to one key or value. Keys escape every
/// space; values only a leading space.
fn escape(s: &str, escape_all_spaces: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            ' ' if escape_all_spaces || i == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' => out.push_str("\\="),
            ':' => out.push_str("\\:"),
            '#' => out.push_str("\\#"),
            '!' => out.push_str("\\!"),
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_round_trip() {
        let original = map(&[("ExternalId", "12345"), ("Type", "library")]);
        let encoded = encode(&original).expect("non-empty map must encode");
        assert_eq!(decode(&encoded).expect("must decode"), original);
    }

    #[test]
    fn test_output_is_sorted_by_key() {
        let encoded = encode(&map(&[("bravo", "2"), ("alpha", "1"), ("charlie", "3")]))
            .expect("non-empty map must encode");
        assert_eq!(encoded, "alpha=1\nbravo=2\ncharlie=3");
    }

    #[test]
    fn test_empty_map_encodes_as_absent() {
        assert_eq!(encode(&BTreeMap::new()), None);
    }

    #[test]
    fn test_set_and_get() {
        let blob = set(None, "Description", Some("  some text  "));
        assert_eq!(blob.as_deref(), Some("Description=some text"));
        assert_eq!(get(blob.as_deref(), "Description").as_deref(), Some("some text"));

        let blob = set(blob.as_deref(), "LegalRemark", Some("ok"));
        assert_eq!(get(blob.as_deref(), "LegalRemark").as_deref(), Some("ok"));
        assert_eq!(get(blob.as_deref(), "Description").as_deref(), Some("some text"));
    }

    #[test]
    fn test_set_blank_removes_entry() {
        let blob = set(None, "a", Some("1"));
        assert_eq!(set(blob.as_deref(), "a", Some("   ")), None);
        assert_eq!(set(blob.as_deref(), "a", None), None);
    }

    #[test]
    fn test_special_characters_escape_reversibly() {
        let original = map(&[
            ("key with spaces", "value"),
            ("equals=colon:", "hash # bang !"),
            ("newline", "line1\nline2\ttabbed"),
            ("back\\slash", "uni\u{00e9}code \u{1f4e6}"),
        ]);
        let encoded = encode(&original).expect("non-empty map must encode");
        // escaped form stays single-line per entry and pure ASCII
        assert_eq!(encoded.lines().count(), original.len());
        assert!(encoded.is_ascii());
        assert_eq!(decode(&encoded).expect("must decode"), original);
    }

    #[test]
    fn test_decode_classic_properties_dialect() {
        let text = "# a comment\n! another\nkey1 = value1\nkey2:value2\nkey3 value3\nkey4=multi\\\n    line\n";
        let decoded = decode(text).expect("must decode");
        assert_eq!(
            decoded,
            map(&[
                ("key1", "value1"),
                ("key2", "value2"),
                ("key3", "value3"),
                ("key4", "multiline"),
            ])
        );
    }

    #[test]
    fn test_key_without_separator_has_empty_value() {
        let decoded = decode("lonely").expect("must decode");
        assert_eq!(decoded, map(&[("lonely", "")]));
    }

    #[test]
    fn test_malformed_unicode_escape_is_swallowed() {
        let bad = "key=\\uZZZZ";
        assert!(decode(bad).is_err());
        assert!(!is_decodable(bad));
        assert!(decode_lossy(Some(bad)).is_empty());
        // lossy get must not fail either
        assert_eq!(get(Some(bad), "key"), None);
    }

    #[test]
    fn test_decodable_probe_accepts_plain_text() {
        assert!(is_decodable("ExternalId=123"));
        assert!(is_decodable(""));
    }

    #[test]
    fn test_leading_space_in_value_survives() {
        let original = map(&[("k", "v with trailing stays")]);
        let encoded = encode(&original).expect("encode");
        assert_eq!(decode(&encoded).expect("decode"), original);
    }
}
