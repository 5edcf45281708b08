//! # codecull-rs: Source-Corpus Curation Engine
//!
//! Curates large, deduplicated corpora of source-code text files for
//! language-model training. Given a root directory (or a cached path
//! snapshot) it enumerates candidate files, rejects files that are not
//! coherent text, rejects files outside configured size/token bounds,
//! eliminates duplicate content across the corpus, and reports
//! corpus-level statistics.
//!
//! ## Pipeline
//!
//! ```text
//! Enumerator → Encoding Validator → Size/Token Filter
//!     → [optional snapshot cache] → Deduplicator → Reporter
//! ```
//!
//! Every stage transforms an ordered [`PathSet`](core::paths::PathSet)
//! into an order-preserving subsequence of it. Per-file work is
//! parallel (rayon), merges are sequential and deterministic, so two
//! runs over the same tree produce byte-identical output.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codecull_rs::core::config::CurationConfig;
//! use codecull_rs::core::pipeline::{curate, InputSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CurationConfig {
//!         deduplicate: true,
//!         print_stats: true,
//!         ..Default::default()
//!     };
//!
//!     let outcome = curate(&InputSelector::from_path("./corpus"), &config)?;
//!     println!("{} files survive curation", outcome.paths.len());
//!     Ok(())
//! }
//! ```
//!
//! Tokenization, model construction and the training loop are external
//! collaborators: they consume the curated path set (or the lazy
//! [`TextRecords`](io::records::TextRecords) stream) and nothing else.

#![warn(missing_docs)]
#![warn(unsafe_code)]

/// Core curation algorithms and data structures.
pub mod core {
    pub mod config;
    pub mod errors;
    pub mod paths;
    pub mod pipeline;
}

/// Snapshot persistence and the downstream record handoff.
pub mod io {
    pub mod cache;
    pub mod records;
}

pub use crate::core::config::CurationConfig;
pub use crate::core::errors::{CullError, Result};
pub use crate::core::paths::PathSet;
pub use crate::core::pipeline::{
    curate, CancelToken, CorpusStats, CurationOutcome, CurationPipeline, InputSelector,
};
pub use crate::io::records::{LmTask, TextRecord, TextRecords};
