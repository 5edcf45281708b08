//! The corpus curation pipeline.
//!
//! Five stages composed over a [`PathSet`]:
//!
//! 1. [`discovery`] — enumerate candidate files under a root
//! 2. [`encoding`] — drop files that are not well-formed text
//! 3. [`size_filter`] — drop files outside the size/token bounds
//! 4. [`dedupe`] — drop files whose content duplicates an earlier file
//! 5. [`stats`] — aggregate corpus statistics over the survivors
//!
//! plus a caching side-channel ([`crate::io::cache`]) that can persist
//! the filtered path set and restore it on a later run, bypassing
//! stages 1–3.
//!
//! Each stage returns a new path set that is an order-preserving
//! subsequence of its input. Per-file work inside a stage runs on a
//! rayon pool; results are reassembled in input order before the next
//! stage sees them, so the ordering invariant holds for any degree of
//! parallelism.

pub mod dedupe;
pub mod discovery;
pub mod encoding;
pub mod size_filter;
pub mod stats;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::core::config::CurationConfig;
use crate::core::errors::{CullError, Result};
use crate::core::paths::PathSet;
use crate::io::cache;

pub use stats::CorpusStats;

/// Cooperative cancellation flag shared between a pipeline run and its
/// controller (e.g. a signal handler).
///
/// Cancellation takes effect between files: in-flight per-file checks
/// finish, remaining ones are skipped, and the last fully-completed
/// stage output is returned valid and inspectable. No stage performs an
/// all-or-nothing commit over the corpus.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// What the pipeline is asked to start from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelector {
    /// Walk this directory through enumeration and filtering.
    Directory(PathBuf),
    /// Load a previously cached path-set snapshot, bypassing
    /// enumeration, encoding validation and size filtering.
    Snapshot(PathBuf),
}

impl InputSelector {
    /// Classify a user-supplied input path: directories trigger a full
    /// walk, anything else is treated as a snapshot file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            Self::Directory(path)
        } else {
            Self::Snapshot(path)
        }
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct CurationOutcome {
    /// The final ordered path set.
    pub paths: PathSet,
    /// Corpus statistics, when requested and the run completed.
    pub stats: Option<CorpusStats>,
    /// True when the run was cancelled; `paths` then holds the output
    /// of the last stage that finished.
    pub cancelled: bool,
}

/// Pipeline driver: owns the configuration and the cancellation token
/// and runs the stages in order.
pub struct CurationPipeline {
    config: CurationConfig,
    cancel: CancelToken,
}

impl CurationPipeline {
    /// Create a pipeline, validating the configuration up front.
    pub fn new(config: CurationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancelToken::new(),
        })
    }

    /// Token for requesting cancellation of a running pipeline from
    /// another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the pipeline over `input`.
    ///
    /// Per-file rejections never surface as errors; only systemic
    /// failures (invalid configuration, missing root, cache corruption)
    /// abort the run.
    pub fn run(&self, input: &InputSelector) -> Result<CurationOutcome> {
        if self.config.jobs > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()
                .map_err(|e| CullError::config(format!("Failed to build worker pool: {e}")))?;
            pool.install(|| self.run_stages(input))
        } else {
            self.run_stages(input)
        }
    }

    fn run_stages(&self, input: &InputSelector) -> Result<CurationOutcome> {
        let filtered = match input {
            InputSelector::Directory(root) => self.enumerate_and_filter(root)?,
            InputSelector::Snapshot(snapshot) => {
                info!("Loading cached path set from '{}'", snapshot.display());
                Some(cache::load(snapshot)?)
            }
        };

        let Some(filtered) = filtered else {
            // Cancelled mid-filtering; nothing downstream to run.
            return Ok(CurationOutcome {
                paths: PathSet::new(),
                stats: None,
                cancelled: true,
            });
        };

        let deduplicated = if self.config.deduplicate {
            let result = dedupe::filter_duplicates(&filtered, &self.cancel);
            if self.cancel.is_cancelled() {
                return Ok(CurationOutcome {
                    paths: filtered,
                    stats: None,
                    cancelled: true,
                });
            }
            result
        } else {
            filtered
        };

        let stats = if self.config.print_stats && !self.cancel.is_cancelled() {
            let computed = stats::compute_stats(&deduplicated, &self.cancel);
            // A partial aggregate would misreport the corpus; drop it.
            if self.cancel.is_cancelled() {
                None
            } else {
                Some(computed)
            }
        } else {
            None
        };

        Ok(CurationOutcome {
            paths: deduplicated,
            stats,
            cancelled: self.cancel.is_cancelled(),
        })
    }

    /// Stages 1–3 plus the optional cache write. Returns `None` when
    /// cancelled before filtering completed.
    fn enumerate_and_filter(&self, root: &Path) -> Result<Option<PathSet>> {
        let enumerated = discovery::enumerate_files(root, &self.config, &self.cancel)?;
        if self.cancel.is_cancelled() {
            return Ok(None);
        }

        let decodable = encoding::filter_valid_encoding(&enumerated, &self.cancel);
        if self.cancel.is_cancelled() {
            return Ok(None);
        }

        let filtered = size_filter::filter_by_size(&decodable, &self.config, &self.cancel);
        if self.cancel.is_cancelled() {
            return Ok(None);
        }

        if let Some(cache_path) = &self.config.cache_output {
            cache::save(&filtered, cache_path)?;
            info!(
                "Cached {} filtered paths to '{}'",
                filtered.len(),
                cache_path.display()
            );
        }

        Ok(Some(filtered))
    }
}

/// Convenience entry point: run the whole pipeline as a pure function
/// of (input selector, configuration).
pub fn curate(input: &InputSelector, config: &CurationConfig) -> Result<CurationOutcome> {
    let pipeline = CurationPipeline::new(config.clone())?;
    let outcome = pipeline.run(input)?;
    if outcome.cancelled {
        warn!("Curation cancelled; returning last completed stage output");
    }
    Ok(outcome)
}
