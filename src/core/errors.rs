//! Error types for the codecull library.
//!
//! The taxonomy distinguishes per-file data problems (which shrink the
//! path set but never abort a run) from systemic problems (bad
//! configuration, corrupt cache snapshots) which fail fast before or
//! during pipeline startup.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main result type for codecull operations.
pub type Result<T> = std::result::Result<T, CullError>;

/// Error type covering every failure mode of the curation pipeline.
///
/// Only `Config`, `CacheCorruption`, `Io` and `Serialization` are ever
/// propagated out of a pipeline run; the per-file variants exist so that
/// stages can report *why* a file was dropped without turning that into a
/// run-level failure.
#[derive(Error, Debug)]
pub enum CullError {
    /// I/O related errors (file reads, cache writes)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors (invalid bounds, missing root path)
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// A subtree could not be enumerated; siblings are unaffected
    #[error("Enumeration error under '{path}': {message}")]
    Enumeration {
        /// Root of the unreadable subtree
        path: PathBuf,
        /// Error description
        message: String,
    },

    /// A file's content is not valid text under the assumed encoding
    #[error("Decode error for '{path}': not valid UTF-8")]
    Decode {
        /// File that failed to decode
        path: PathBuf,
    },

    /// A file vanished or became unreadable during fingerprinting or stats
    #[error("Fingerprint read error for '{path}': {message}")]
    FingerprintRead {
        /// File that could not be read
        path: PathBuf,
        /// Error description
        message: String,
    },

    /// A cached path-set snapshot is unreadable or malformed.
    ///
    /// Deliberately fatal: silently re-walking on a corrupt cache could
    /// mask a configuration mistake, so the caller must fall back to
    /// re-enumeration explicitly.
    #[error("Cache corruption in '{path}': {message}")]
    CacheCorruption {
        /// Snapshot file that failed to load
        path: PathBuf,
        /// Error description
        message: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CullError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new enumeration error for an unreadable subtree
    pub fn enumeration(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Enumeration {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new fingerprint-read error
    pub fn fingerprint_read(path: impl Into<PathBuf>, source: &io::Error) -> Self {
        Self::FingerprintRead {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a new cache-corruption error
    pub fn cache_corruption(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CacheCorruption {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors that must abort the run rather than drop a file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::CacheCorruption { .. }
                | Self::Io { .. }
                | Self::Serialization { .. }
        )
    }
}

impl From<io::Error> for CullError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for CullError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for CullError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CullError::config("bad bounds");
        assert!(matches!(err, CullError::Config { .. }));

        let err = CullError::enumeration("/corpus/private", "permission denied");
        assert!(matches!(err, CullError::Enumeration { .. }));
    }

    #[test]
    fn test_config_field_error() {
        let err = CullError::config_field("must be positive", "max_size_bytes");

        if let CullError::Config { message, field } = err {
            assert_eq!(message, "must be positive");
            assert_eq!(field, Some("max_size_bytes".to_string()));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_fatal_classification() {
        assert!(CullError::config("x").is_fatal());
        assert!(CullError::cache_corruption("cache.json", "truncated").is_fatal());
        assert!(!CullError::enumeration("/a", "eperm").is_fatal());
        assert!(!CullError::Decode {
            path: PathBuf::from("d.bin")
        }
        .is_fatal());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CullError = io_err.into();
        assert!(matches!(err, CullError::Io { .. }));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: CullError = json_err.into();
        assert!(matches!(err, CullError::Serialization { .. }));
    }

    #[test]
    fn test_error_display_formatting() {
        let err = CullError::cache_corruption("snap.json", "unexpected EOF");
        let display = format!("{err}");
        assert!(display.contains("Cache corruption"));
        assert!(display.contains("snap.json"));
    }
}
