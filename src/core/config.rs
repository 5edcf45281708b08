//! Configuration types for the curation pipeline.
//!
//! A pipeline run is a pure function of (input selector, configuration):
//! there is no ambient global state, no environment-variable side
//! channel, and no process-wide mutable defaults. Everything the stages
//! need arrives through [`CurationConfig`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{CullError, Result};

/// Default upper bound on file size: 1 MiB. Files above this tend to be
/// generated code or data blobs that dominate batch memory downstream.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 1 << 20;

/// Default lower bound on the whitespace-token count. Files below this
/// carry essentially no training signal.
pub const DEFAULT_MIN_TOKENS: usize = 15;

/// Configuration for a single curation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurationConfig {
    /// Run the deduplication stage over the filtered path set.
    pub deduplicate: bool,

    /// Compute and report corpus statistics over the final path set.
    pub print_stats: bool,

    /// Persist the filtered (pre-dedup) path set to this snapshot file.
    pub cache_output: Option<PathBuf>,

    /// Maximum file size in bytes, inclusive. Must be nonzero.
    pub max_size_bytes: u64,

    /// Minimum whitespace-delimited token count, inclusive. This is a
    /// cheap proxy for content length, not a tokenizer invocation.
    pub min_tokens: usize,

    /// Glob patterns a file must match to be enumerated. Empty means
    /// every regular file is a candidate.
    pub include_patterns: Vec<String>,

    /// Glob patterns that exclude files from enumeration.
    pub exclude_patterns: Vec<String>,

    /// Worker threads for per-file checks. Zero selects the rayon
    /// default (one per logical CPU).
    pub jobs: usize,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            deduplicate: false,
            print_stats: false,
            cache_output: None,
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            min_tokens: DEFAULT_MIN_TOKENS,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            jobs: 0,
        }
    }
}

impl CurationConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            CullError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            CullError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate bounds before any work begins.
    pub fn validate(&self) -> Result<()> {
        if self.max_size_bytes == 0 {
            return Err(CullError::config_field(
                "max_size_bytes must be greater than zero",
                "max_size_bytes",
            ));
        }

        for pattern in self.include_patterns.iter().chain(&self.exclude_patterns) {
            globset::Glob::new(pattern).map_err(|e| {
                CullError::config(format!("Invalid glob pattern '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CurationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_size_bytes, 1 << 20);
        assert_eq!(config.min_tokens, 15);
        assert!(!config.deduplicate);
    }

    #[test]
    fn zero_max_size_is_rejected() {
        let config = CurationConfig {
            max_size_bytes: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, CullError::Config { .. }));
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let config = CurationConfig {
            exclude_patterns: vec!["[invalid".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let mut config = CurationConfig::default();
        config.deduplicate = true;
        config.min_tokens = 30;
        config.to_yaml_file(&path).unwrap();

        let loaded = CurationConfig::from_yaml_file(&path).unwrap();
        assert!(loaded.deduplicate);
        assert_eq!(loaded.min_tokens, 30);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: CurationConfig = serde_yaml::from_str("deduplicate: true").unwrap();
        assert!(config.deduplicate);
        assert_eq!(config.max_size_bytes, DEFAULT_MAX_SIZE_BYTES);
    }
}
