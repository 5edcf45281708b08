//! Path-set snapshot cache.
//!
//! Persists the ordered path sequence produced by filtering so a later
//! run can skip re-walking the filesystem. The cache is strictly an
//! optimization: it stores the *pre-dedup* set (deduplication is cheap
//! to redo and load-bearing for correctness, so it always re-runs on
//! load), and a missing or stale snapshot only ever costs time, never
//! correctness.
//!
//! A snapshot that exists but cannot be parsed is a fatal error for the
//! run. Silently falling back to a re-walk could mask a configuration
//! mistake, so the caller must choose re-enumeration explicitly.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{CullError, Result};
use crate::core::paths::PathSet;

/// Snapshot format version; bumped on incompatible layout changes.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    paths: PathSet,
}

/// Persist `paths` to `destination` as a JSON snapshot.
pub fn save(paths: &PathSet, destination: &Path) -> Result<()> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        paths: paths.clone(),
    };
    let content = serde_json::to_string(&snapshot)?;
    fs::write(destination, content).map_err(|e| {
        CullError::io(
            format!("Failed to write snapshot '{}'", destination.display()),
            e,
        )
    })?;
    debug!(
        "Wrote snapshot of {} paths to '{}'",
        paths.len(),
        destination.display()
    );
    Ok(())
}

/// Restore a path set from a snapshot written by [`save`].
///
/// Round-trips exactly: `load(save(s)) == s`, preserving membership and
/// order. Malformed or version-mismatched snapshots fail with
/// [`CullError::CacheCorruption`].
pub fn load(source: &Path) -> Result<PathSet> {
    let content = fs::read_to_string(source).map_err(|e| {
        CullError::cache_corruption(source, format!("snapshot unreadable: {e}"))
    })?;

    let snapshot: Snapshot = serde_json::from_str(&content)
        .map_err(|e| CullError::cache_corruption(source, format!("malformed snapshot: {e}")))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(CullError::cache_corruption(
            source,
            format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            ),
        ));
    }

    debug!(
        "Loaded snapshot of {} paths from '{}'",
        snapshot.paths.len(),
        source.display()
    );
    Ok(snapshot.paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn set(paths: &[&str]) -> PathSet {
        PathSet::from_paths(paths.iter().map(PathBuf::from))
    }

    #[test]
    fn round_trip_preserves_membership_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("paths.json");

        let original = set(&["z/last.py", "a/first.py", "m/middle.py"]);
        save(&original, &snapshot).unwrap();
        let restored = load(&snapshot).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn empty_set_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("empty.json");

        save(&PathSet::new(), &snapshot).unwrap();
        assert!(load(&snapshot).unwrap().is_empty());
    }

    #[test]
    fn malformed_snapshot_is_cache_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("bad.json");
        fs::write(&snapshot, "[1, 2, oops").unwrap();

        let err = load(&snapshot).unwrap_err();
        assert!(matches!(err, CullError::CacheCorruption { .. }));
    }

    #[test]
    fn missing_snapshot_is_cache_corruption() {
        let err = load(Path::new("/nonexistent/snap.json")).unwrap_err();
        assert!(matches!(err, CullError::CacheCorruption { .. }));
    }

    #[test]
    fn version_mismatch_is_cache_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("future.json");
        fs::write(&snapshot, r#"{"version": 99, "paths": []}"#).unwrap();

        let err = load(&snapshot).unwrap_err();
        assert!(matches!(err, CullError::CacheCorruption { .. }));
    }
}
