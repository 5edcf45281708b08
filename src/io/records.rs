//! Lazy text-record handoff to downstream dataset loaders.
//!
//! The curated path set is consumed by an external tokenizer/training
//! stack; this module is the boundary. [`TextRecords`] yields one
//! decoded document per surviving file, in path-set order, reading
//! lazily so the corpus is never materialized in memory. The iterator
//! is finite, single-pass and not restartable.

use std::fs;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::paths::PathSet;

/// One decoded training document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    /// Where the document came from.
    pub path: PathBuf,
    /// Full decoded content.
    pub text: String,
}

/// Language-model training objective selected by the downstream
/// collaborator.
///
/// A closed variant rather than a task-name string: a misspelled task
/// cannot type-check, where string dispatch would silently select
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LmTask {
    /// Causal (autoregressive) language modeling.
    Causal,
    /// Masked language modeling.
    Masked,
}

/// Streaming iterator over the decoded contents of a path set.
///
/// Files that became unreadable after curation are skipped with a
/// warning; the downstream consumer sees only complete records.
pub struct TextRecords {
    paths: std::vec::IntoIter<PathBuf>,
}

impl TextRecords {
    /// Create a record stream over `paths`.
    pub fn new(paths: PathSet) -> Self {
        Self {
            paths: paths.into_vec().into_iter(),
        }
    }
}

impl Iterator for TextRecords {
    type Item = TextRecord;

    fn next(&mut self) -> Option<TextRecord> {
        for path in self.paths.by_ref() {
            match fs::read_to_string(&path) {
                Ok(text) => return Some(TextRecord { path, text }),
                Err(err) => {
                    warn!("Skipping unreadable record: {} ({err})", path.display());
                }
            }
        }
        None
    }
}
