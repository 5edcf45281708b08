//! Size and token-count filtering stage.
//!
//! Two cheap, local checks that run before the expensive deduplication
//! pass: an upper bound on byte size (rejecting pathological giant
//! files) and a lower bound on an estimated token count (rejecting
//! near-empty files with no training signal). The token estimate is a
//! whitespace-delimited word count, deliberately not a tokenizer
//! invocation.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::config::CurationConfig;
use crate::core::paths::PathSet;
use crate::core::pipeline::CancelToken;

/// Retain files with `byte_size <= max_size_bytes` and at least
/// `min_tokens` whitespace-delimited tokens. Both bounds are inclusive.
///
/// Once `cancel` fires, remaining files are skipped without being read;
/// the caller discards the partial result.
pub fn filter_by_size(paths: &PathSet, config: &CurationConfig, cancel: &CancelToken) -> PathSet {
    let verdicts: Vec<bool> = paths
        .as_slice()
        .par_iter()
        .map(|path| {
            !cancel.is_cancelled()
                && within_bounds(path, config.max_size_bytes, config.min_tokens)
        })
        .collect();

    let kept = paths.retain_by_mask(&verdicts);
    info!(
        "Size/token filter kept {} of {} files (max {} bytes, min {} tokens)",
        kept.len(),
        paths.len(),
        config.max_size_bytes,
        config.min_tokens
    );
    kept
}

fn within_bounds(path: &Path, max_size_bytes: u64, min_tokens: usize) -> bool {
    // Size check first: metadata alone rules out oversized files
    // without touching their content.
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(err) => {
            debug!("Unreadable during size check, dropping: {} ({err})", path.display());
            return false;
        }
    };

    if size > max_size_bytes {
        debug!(
            "Over size bound ({size} > {max_size_bytes} bytes), dropping: {}",
            path.display()
        );
        return false;
    }

    if min_tokens == 0 {
        return true;
    }

    match fs::read_to_string(path) {
        // Stop counting as soon as the bound is met.
        Ok(content) => content.split_whitespace().take(min_tokens).count() >= min_tokens,
        Err(err) => {
            debug!("Unreadable during token count, dropping: {} ({err})", path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(max_size_bytes: u64, min_tokens: usize) -> CurationConfig {
        CurationConfig {
            max_size_bytes,
            min_tokens,
            ..Default::default()
        }
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn size_bound_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let exact = write(dir.path(), "exact.c", "abcdefgh"); // 8 bytes
        let over = write(dir.path(), "over.c", "abcdefghi"); // 9 bytes

        let input = PathSet::from_paths(vec![exact.clone(), over]);
        let output = filter_by_size(&input, &config(8, 0), &CancelToken::new());
        assert_eq!(output.as_slice(), &[exact]);
    }

    #[test]
    fn token_bound_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let exact = write(dir.path(), "exact.py", "a b c");
        let under = write(dir.path(), "under.py", "a b");

        let input = PathSet::from_paths(vec![exact.clone(), under]);
        let output = filter_by_size(&input, &config(1 << 20, 3), &CancelToken::new());
        assert_eq!(output.as_slice(), &[exact]);
    }

    #[test]
    fn token_count_handles_mixed_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "ws.py", "a\tb\nc   d\n\n e");

        let input = PathSet::from_paths(vec![file]);
        assert_eq!(filter_by_size(&input, &config(1 << 20, 5), &CancelToken::new()).len(), 1);
        assert_eq!(filter_by_size(&input, &config(1 << 20, 6), &CancelToken::new()).len(), 0);
    }

    #[test]
    fn vanished_file_is_dropped_not_fatal() {
        let input = PathSet::from_paths(vec![PathBuf::from("/nonexistent/y.py")]);
        let output = filter_by_size(&input, &config(1 << 20, 1), &CancelToken::new());
        assert!(output.is_empty());
    }
}
