//! Unified error types for standard-bom.
//!
//! Validation failures are raised synchronously at the point of assignment;
//! I/O errors keep their path context so callers can apply their own retry
//! policy; a missing input file is distinguishable from any other I/O error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for standard-bom operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StandardBomError {
    /// The requested input file does not exist
    #[error("input file not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors with path context
    #[error("I/O error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Errors while parsing a Standard BOM document
    #[error("failed to parse Standard BOM: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Caller-input validation errors (hash formats, purl shape, external IDs)
    #[error("validation failed: {0}")]
    Validation(String),

    /// The underlying CycloneDX generator rejected the object graph
    #[error("failed to serialize Standard BOM: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The embedded version/properties resource is missing or malformed
    #[error("failed to load version resource {resource}: {message}")]
    Resource { resource: String, message: String },
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("not a recognizable CycloneDX document: {0}")]
    NotCycloneDx(String),
}

/// Convenient Result type for standard-bom operations
pub type Result<T> = std::result::Result<T, StandardBomError>;

impl StandardBomError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context. A not-found condition is mapped
    /// to its own variant so callers can tell it apart.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path, source };
        }
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a serialization error wrapping the generator's failure
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}

impl From<std::io::Error> for StandardBomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StandardBomError::io("/path/to/missing.json", io_err);
        assert!(matches!(err, StandardBomError::NotFound { .. }));
        assert!(err.to_string().contains("/path/to/missing.json"));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StandardBomError::io("/path/to/locked.json", io_err);
        assert!(matches!(err, StandardBomError::Io { .. }));
    }

    #[test]
    fn test_parse_error_display() {
        let err = StandardBomError::parse(
            "at input.json",
            ParseErrorKind::InvalidJson("expected value at line 1".to_string()),
        );
        let display = err.to_string();
        assert!(display.contains("parse"), "unexpected message: {display}");
    }

    #[test]
    fn test_validation_error_display() {
        let err = StandardBomError::validation("value is not a valid SHA-256 hash: xyz");
        assert!(err.to_string().contains("SHA-256"));
    }
}
