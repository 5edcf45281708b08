//! Candidate file discovery.
//!
//! Walks a root directory and produces the ordered sequence of all
//! regular files reachable under it. Non-regular entries (directories,
//! dangling symlinks, devices) are excluded. An unreadable subtree is
//! reported and skipped; it never aborts enumeration of its siblings,
//! so one bad directory cannot lose the rest of the corpus.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::config::CurationConfig;
use crate::core::errors::{CullError, Result};
use crate::core::paths::PathSet;
use crate::core::pipeline::CancelToken;

/// Enumerate every regular file under `root` in lexicographic
/// full-path order.
///
/// The ordering is load-bearing: cached snapshots, dedup tie-breaks and
/// derived statistics all assume enumeration order is stable across
/// runs and machines.
pub fn enumerate_files(
    root: &Path,
    config: &CurationConfig,
    cancel: &CancelToken,
) -> Result<PathSet> {
    if !root.is_dir() {
        return Err(CullError::config(format!(
            "Input root '{}' is not a directory",
            root.display()
        )));
    }

    let include = compile_globset(&config.include_patterns)?;
    let exclude = compile_globset(&config.exclude_patterns)?;

    let mut collected: Vec<PathBuf> = Vec::new();
    let mut subtree_errors = 0usize;

    let walker = WalkDir::new(root).follow_links(false);
    for entry in walker {
        if cancel.is_cancelled() {
            debug!("Enumeration cancelled after {} entries", collected.len());
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                // Report, count, and keep walking siblings.
                let at = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                warn!("{}", CullError::enumeration(at, err.to_string()));
                subtree_errors += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if should_keep(&path, root, include.as_ref(), exclude.as_ref()) {
            collected.push(path);
        }
    }

    collected.sort();

    info!(
        "Enumerated {} candidate files under '{}' ({} unreadable subtrees skipped)",
        collected.len(),
        root.display(),
        subtree_errors
    );

    Ok(PathSet::from_paths(collected))
}

fn should_keep(
    path: &Path,
    root: &Path,
    include: Option<&GlobSet>,
    exclude: Option<&GlobSet>,
) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);

    if let Some(exclude) = exclude {
        if exclude.is_match(relative) {
            debug!("Excluded by pattern: {}", path.display());
            return false;
        }
    }

    if let Some(include) = include {
        include.is_match(relative)
    } else {
        true
    }
}

fn compile_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }
        let glob = Glob::new(pattern).map_err(|err| {
            CullError::config(format!("Invalid glob pattern '{pattern}': {err}"))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map(Some)
        .map_err(|err| CullError::config(format!("Failed to build glob set: {err}")))
}
