//! Deduplicated set of files to scan for class names.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Canonical absolute paths in order of first match.
///
/// Equality ignores order: two sets holding the same paths are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileSet {
    paths: IndexSet<PathBuf>,
}

impl FileSet {
    /// Create an empty file set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning false if it was already present
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.paths.insert(path)
    }

    /// Remove a path, keeping the relative order of the remaining entries
    pub fn remove(&mut self, path: &Path) -> bool {
        self.paths.shift_remove(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate paths in order of first match
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    /// Union with another set; entries already present keep their position
    pub fn extend_from(&mut self, other: &FileSet) {
        self.paths.extend(other.paths.iter().cloned());
    }

    /// Paths sorted lexicographically
    pub fn sorted(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.paths.iter().cloned().collect();
        paths.sort();
        paths
    }
}

impl FromIterator<PathBuf> for FileSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl Extend<PathBuf> for FileSet {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

impl IntoIterator for FileSet {
    type Item = PathBuf;
    type IntoIter = indexmap::set::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = indexmap::set::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_deduplicates() {
        let mut set = FileSet::new();
        assert!(set.insert(PathBuf::from("/p/index.html")));
        assert!(!set.insert(PathBuf::from("/p/index.html")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_first_match_order() {
        let set: FileSet = ["/p/b.rs", "/p/a.rs", "/p/b.rs"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        let order: Vec<_> = set.iter().cloned().collect();
        assert_eq!(order, vec![PathBuf::from("/p/b.rs"), PathBuf::from("/p/a.rs")]);
        assert_eq!(set.sorted(), vec![PathBuf::from("/p/a.rs"), PathBuf::from("/p/b.rs")]);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: FileSet = ["/x", "/y"].into_iter().map(PathBuf::from).collect();
        let b: FileSet = ["/y", "/x"].into_iter().map(PathBuf::from).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut set: FileSet = ["/a", "/b", "/c"].into_iter().map(PathBuf::from).collect();
        assert!(set.remove(Path::new("/b")));
        assert!(!set.remove(Path::new("/b")));
        let order: Vec<_> = set.into_iter().collect();
        assert_eq!(order, vec![PathBuf::from("/a"), PathBuf::from("/c")]);
    }
}
