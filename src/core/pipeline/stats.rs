//! Corpus statistics over a finalized path set.
//!
//! Pure aggregation: each file is read exactly once, summing line
//! counts and byte sizes. Files that became unreadable between
//! filtering and reporting (a race against concurrent filesystem
//! mutation) are skipped and counted, never a hard failure — the
//! corpus may be gathered over a long-running crawl of a live tree.

use std::fmt;
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::paths::PathSet;
use crate::core::pipeline::CancelToken;

/// Aggregate statistics for a curated corpus.
///
/// Derived and read-only: recomputed on demand from the current path
/// set, never persisted as authoritative state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of files in the final path set that could be read.
    pub file_count: usize,
    /// Total line count across those files.
    pub total_loc: usize,
    /// Total byte size across those files.
    pub total_bytes: u64,
    /// Files that became unreadable between filtering and reporting.
    pub skipped_files: usize,
}

impl CorpusStats {
    /// Dataset size in gigabytes (2^30 bytes).
    pub fn size_gb(&self) -> f64 {
        self.total_bytes as f64 / (1u64 << 30) as f64
    }
}

impl fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# source files: {}", group_thousands(self.file_count))?;
        writeln!(f, "LOC: {}", group_thousands(self.total_loc))?;
        write!(f, "Dataset size: {:.3} GB", self.size_gb())?;
        if self.skipped_files > 0 {
            write!(f, "\n(skipped {} unreadable files)", self.skipped_files)?;
        }
        Ok(())
    }
}

/// Compute statistics over `paths`, reading each file once.
///
/// On cancellation, remaining files are skipped; the caller decides
/// whether the partial result is worth reporting.
pub fn compute_stats(paths: &PathSet, cancel: &CancelToken) -> CorpusStats {
    let per_file: Vec<Option<(usize, u64)>> = paths
        .as_slice()
        .par_iter()
        .map(|path| {
            if cancel.is_cancelled() {
                None
            } else {
                measure_file(path)
            }
        })
        .collect();

    let mut stats = CorpusStats::default();
    for measurement in per_file {
        match measurement {
            Some((loc, bytes)) => {
                stats.file_count += 1;
                stats.total_loc += loc;
                stats.total_bytes += bytes;
            }
            None => stats.skipped_files += 1,
        }
    }
    stats
}

fn measure_file(path: &Path) -> Option<(usize, u64)> {
    match fs::read_to_string(path) {
        Ok(content) => Some((content.lines().count(), content.len() as u64)),
        Err(err) => {
            warn!("Skipping unreadable file in stats: {} ({err})", path.display());
            None
        }
    }
}

/// Format an integer with `,` thousands separators, matching the
/// human-readable summary layout.
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn stats_are_additive_over_the_path_set() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.py");
        let b = dir.path().join("b.py");
        fs::write(&a, "line one\nline two\n").unwrap(); // 18 bytes, 2 lines
        fs::write(&b, "only\n").unwrap(); // 5 bytes, 1 line

        let stats = compute_stats(&PathSet::from_paths(vec![a, b]), &CancelToken::new());
        assert_eq!(stats.file_count, 2);
        assert_eq!(stats.total_loc, 3);
        assert_eq!(stats.total_bytes, 23);
        assert_eq!(stats.skipped_files, 0);
    }

    #[test]
    fn vanished_files_are_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.py");
        fs::write(&a, "x\n").unwrap();

        let set = PathSet::from_paths(vec![a, PathBuf::from("/nonexistent/gone.py")]);
        let stats = compute_stats(&set, &CancelToken::new());
        assert_eq!(stats.file_count, 1);
        assert_eq!(stats.skipped_files, 1);
    }

    #[test]
    fn cancellation_skips_remaining_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.py");
        fs::write(&a, "x\n").unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let stats = compute_stats(&PathSet::from_paths(vec![a]), &cancel);
        assert_eq!(stats.file_count, 0);
        assert_eq!(stats.skipped_files, 1);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn display_includes_all_three_metrics() {
        let stats = CorpusStats {
            file_count: 1200,
            total_loc: 34000,
            total_bytes: 1 << 30,
            skipped_files: 0,
        };
        let rendered = stats.to_string();
        assert!(rendered.contains("# source files: 1,200"));
        assert!(rendered.contains("LOC: 34,000"));
        assert!(rendered.contains("1.000 GB"));
    }
}
