//! The ordered, duplicate-free path sequence flowing through the pipeline.
//!
//! A [`PathSet`] is the currency every stage consumes and produces. Each
//! stage returns a *new* set that is a subsequence of its input, so
//! intermediate results stay independently inspectable and cacheable.

use std::path::{Path, PathBuf};
use std::slice;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// An ordered sequence of file paths with no duplicate entries.
///
/// Ordering is established once at enumeration time (lexicographic
/// full-path order) and preserved by every downstream stage; it is what
/// makes cached snapshots and derived statistics reproducible across
/// runs and machines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathSet {
    paths: Vec<PathBuf>,
}

impl PathSet {
    /// Create an empty path set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path set from an iterator, dropping duplicate entries
    /// while keeping the first occurrence of each path.
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut seen = AHashSet::new();
        let mut unique = Vec::new();
        for path in paths {
            if seen.insert(path.clone()) {
                unique.push(path);
            }
        }
        Self { paths: unique }
    }

    /// Number of paths in the set.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when the set contains no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over the paths in order.
    pub fn iter(&self) -> slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    /// Borrow the underlying ordered slice.
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Consume the set, yielding the ordered path vector.
    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }

    /// Retain the subsequence of paths for which `keep` yields true.
    ///
    /// `keep` receives one flag per path, in order; this is how stages
    /// that compute per-file verdicts in parallel reassemble their
    /// output without disturbing relative order.
    pub fn retain_by_mask(&self, keep: &[bool]) -> Self {
        debug_assert_eq!(keep.len(), self.paths.len());
        let paths = self
            .paths
            .iter()
            .zip(keep)
            .filter(|(_, &k)| k)
            .map(|(p, _)| p.clone())
            .collect();
        Self { paths }
    }

    /// True when `other` is a subsequence of `self` in the same relative
    /// order. Used by tests to verify the stage invariant.
    pub fn is_subsequence_of(&self, other: &PathSet) -> bool {
        let mut candidates = other.paths.iter();
        self.paths
            .iter()
            .all(|p| candidates.any(|c| c == p))
    }

    /// True when the set contains `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

impl FromIterator<PathBuf> for PathSet {
    fn from_iter<T: IntoIterator<Item = PathBuf>>(iter: T) -> Self {
        Self::from_paths(iter)
    }
}

impl<'a> IntoIterator for &'a PathSet {
    type Item = &'a PathBuf;
    type IntoIter = slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl IntoIterator for PathSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> PathSet {
        PathSet::from_paths(paths.iter().map(PathBuf::from))
    }

    #[test]
    fn from_paths_drops_duplicates_keeping_first() {
        let s = set(&["a.py", "b.py", "a.py"]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.as_slice()[0], PathBuf::from("a.py"));
        assert_eq!(s.as_slice()[1], PathBuf::from("b.py"));
    }

    #[test]
    fn retain_by_mask_preserves_relative_order() {
        let s = set(&["a", "b", "c", "d"]);
        let filtered = s.retain_by_mask(&[true, false, true, false]);
        assert_eq!(filtered.as_slice(), &[PathBuf::from("a"), PathBuf::from("c")]);
        assert!(filtered.is_subsequence_of(&s));
    }

    #[test]
    fn subsequence_check_rejects_reordering() {
        let a = set(&["a", "b"]);
        let b = set(&["b", "a"]);
        assert!(!a.is_subsequence_of(&b) || !b.is_subsequence_of(&a));
        assert!(set(&["b"]).is_subsequence_of(&b));
    }
}
