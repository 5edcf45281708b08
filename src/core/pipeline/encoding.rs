//! Encoding validation stage.
//!
//! Retains only files whose content decodes as well-formed UTF-8. This
//! is a pass/fail filter, not a materializer: each file's bytes are
//! read, checked and discarded, so peak memory stays bounded by the
//! largest single file regardless of corpus size.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::errors::CullError;
use crate::core::paths::PathSet;
use crate::core::pipeline::CancelToken;

/// Filter `paths` down to files that decode cleanly as UTF-8.
///
/// Verdicts are computed in parallel and reassembled in input order, so
/// the output is always an order-preserving subsequence of the input.
/// A decode failure (or a read failure at this stage) drops exactly
/// that file; it is never a pipeline-fatal error.
///
/// Once `cancel` fires, remaining files are skipped without being read;
/// the caller discards the partial result.
pub fn filter_valid_encoding(paths: &PathSet, cancel: &CancelToken) -> PathSet {
    let verdicts: Vec<bool> = paths
        .as_slice()
        .par_iter()
        .map(|path| !cancel.is_cancelled() && decodes_as_utf8(path))
        .collect();

    let kept = paths.retain_by_mask(&verdicts);
    info!(
        "Encoding filter kept {} of {} files",
        kept.len(),
        paths.len()
    );
    kept
}

fn decodes_as_utf8(path: &Path) -> bool {
    match fs::read(path) {
        Ok(bytes) => match std::str::from_utf8(&bytes) {
            Ok(_) => true,
            Err(_) => {
                debug!(
                    "{}",
                    CullError::Decode {
                        path: path.to_path_buf()
                    }
                );
                false
            }
        },
        Err(err) => {
            debug!("Unreadable during encoding check, dropping: {} ({err})", path.display());
            false
        }
    }
}
