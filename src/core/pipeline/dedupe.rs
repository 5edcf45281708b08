//! Content-based deduplication stage.
//!
//! Fingerprints every file with blake3 and keeps only the first file
//! seen for each distinct digest. Fingerprints are a pure function of
//! file content; path, metadata and modification time play no part, so
//! identical content is detected wherever it lives.
//!
//! Fingerprints are computed in parallel, but the winner for each
//! digest is decided by a single sequential scan in enumeration order.
//! That scan is the pipeline's one serialization point and is what
//! guarantees the first-occurrence-wins tie-break exactly, regardless
//! of how the parallel hashing was scheduled.
//!
//! Memory cost is O(number of distinct fingerprints): digests are 32
//! bytes each, independent of file length.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use ahash::AHashSet;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::errors::CullError;
use crate::core::paths::PathSet;
use crate::core::pipeline::CancelToken;

/// Fixed-size content digest used to detect duplicate file content.
pub type Fingerprint = [u8; 32];

const HASH_BUF_SIZE: usize = 64 * 1024;

/// Drop every file whose content duplicates an earlier-seen file.
///
/// Files that cannot be read during fingerprinting are dropped with a
/// warning rather than aborting the pass; the file may have vanished
/// between filtering and deduplication on a live filesystem.
///
/// Once `cancel` fires, remaining files are skipped without being
/// hashed; the caller discards the partial result.
pub fn filter_duplicates(paths: &PathSet, cancel: &CancelToken) -> PathSet {
    let fingerprints: Vec<Option<Fingerprint>> = paths
        .as_slice()
        .par_iter()
        .map(|path| {
            if cancel.is_cancelled() {
                return None;
            }
            match fingerprint_file(path) {
                Ok(digest) => Some(digest),
                Err(err) => {
                    warn!("{}", CullError::fingerprint_read(path, &err));
                    None
                }
            }
        })
        .collect();

    // Sequential in-order merge: first occurrence of a digest wins.
    let mut seen: AHashSet<Fingerprint> = AHashSet::new();
    let verdicts: Vec<bool> = fingerprints
        .iter()
        .map(|digest| match digest {
            Some(digest) => seen.insert(*digest),
            None => false,
        })
        .collect();

    let kept = paths.retain_by_mask(&verdicts);
    info!(
        "Deduplication kept {} of {} files ({} distinct fingerprints)",
        kept.len(),
        paths.len(),
        seen.len()
    );
    kept
}

/// Hash a file's full contents in streaming fashion.
fn fingerprint_file(path: &Path) -> io::Result<Fingerprint> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = [0u8; HASH_BUF_SIZE];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(*hasher.finalize().as_bytes())
}
