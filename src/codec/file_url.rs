//! Reversible transform between a relative path and a `file:` URL.

use regex::Regex;
use std::sync::OnceLock;

/// Matches `file:` URLs with zero to three slashes after the scheme.
fn file_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("(?i)^file:/{0,3}(.+)$").expect("static file URL pattern"))
}

/// Wrap `path` in the authority-less `file:///` form unless it already is a
/// `file:` URL.
#[must_use]
pub fn ensure_file_url(path: &str) -> String {
    if file_url_pattern().is_match(path) {
        path.to_string()
    } else {
        format!("file:///{path}")
    }
}

/// Strip a `file:` URL prefix, returning the bare path. Anything that is not
/// a `file:` URL passes through unchanged.
#[must_use]
pub fn strip_file_url(url: &str) -> &str {
    match file_url_pattern().captures(url) {
        Some(caps) => caps.get(1).map_or(url, |m| m.as_str()),
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_wraps_bare_path() {
        assert_eq!(ensure_file_url("my/path"), "file:///my/path");
    }

    #[test]
    fn test_ensure_keeps_existing_file_url() {
        assert_eq!(ensure_file_url("file:///my/path"), "file:///my/path");
        assert_eq!(ensure_file_url("file:my/path"), "file:my/path");
        assert_eq!(ensure_file_url("FILE:///my/path"), "FILE:///my/path");
    }

    #[test]
    fn test_strip_removes_any_slash_count() {
        assert_eq!(strip_file_url("file:///my/path"), "my/path");
        assert_eq!(strip_file_url("file://my/path"), "my/path");
        assert_eq!(strip_file_url("file:/my/path"), "my/path");
        assert_eq!(strip_file_url("file:my/path"), "my/path");
    }

    #[test]
    fn test_strip_passes_through_other_urls() {
        assert_eq!(strip_file_url("https://example.com/x"), "https://example.com/x");
        assert_eq!(strip_file_url("my/path"), "my/path");
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(strip_file_url(&ensure_file_url("a/b/c.zip")), "a/b/c.zip");
    }
}
