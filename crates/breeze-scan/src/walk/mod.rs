//! Filesystem traversal for a single content pattern

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use breeze_core::error::ConfigError;
use dashmap::DashMap;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::pattern::ContentPattern;
use crate::ScanResult;

/// Deepest directory level any pattern may descend to
pub const MAX_WALK_DEPTH: usize = 64;

/// Entries a single pattern may visit before the scan is aborted
pub const MAX_VISITED_ENTRIES: usize = 1_000_000;

/// Traversal ceilings applied to every pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkLimits {
    pub max_depth: usize,
    pub max_entries: usize,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_WALK_DEPTH,
            max_entries: MAX_VISITED_ENTRIES,
        }
    }
}

/// Canonical path cache shared by the parallel walks of one scan
pub type CanonicalCache = DashMap<PathBuf, PathBuf>;

/// Enumerate the files matched by one pattern, as canonical paths in walk order
pub fn walk_pattern(
    pattern: &ContentPattern,
    limits: &WalkLimits,
    cache: &CanonicalCache,
) -> ScanResult<Vec<PathBuf>> {
    let base = pattern.base();

    let metadata = match fs::metadata(base) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(pattern = pattern.source(), base = %base.display(), "pattern base does not exist");
            return Ok(Vec::new());
        },
        Err(e) => return Err(ConfigError::inaccessible_pattern(pattern.source(), pattern.index(), e)),
    };

    if pattern.is_literal() {
        if !metadata.is_file() {
            return Ok(Vec::new());
        }
        let canonical = canonicalize(base, cache)
            .map_err(|e| ConfigError::inaccessible_pattern(pattern.source(), pattern.index(), e))?;
        return Ok(vec![canonical]);
    }

    if !metadata.is_dir() {
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(base)
        .follow_links(true)
        .min_depth(1)
        .max_depth(pattern.depth().min(limits.max_depth))
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| pattern.reaches_hidden() || !is_hidden(entry));

    let mut matches = Vec::new();
    let mut visited = 0usize;

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                debug!(
                    pattern = pattern.source(),
                    path = ?err.path(),
                    "skipping symlink cycle"
                );
                continue;
            },
            Err(err) if is_dangling_link(&err) => {
                debug!(
                    pattern = pattern.source(),
                    path = ?err.path(),
                    "skipping dangling symlink"
                );
                continue;
            },
            Err(err) => {
                return Err(ConfigError::inaccessible_pattern(
                    pattern.source(),
                    pattern.index(),
                    io::Error::from(err),
                ));
            },
        };

        visited += 1;
        if visited > limits.max_entries {
            return Err(ConfigError::malformed_pattern(
                pattern.source(),
                pattern.index(),
                format!("traversal visited more than {} entries", limits.max_entries),
            ));
        }

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(base).unwrap_or(entry.path());
        if pattern.matches(relative) {
            trace!(pattern = pattern.source(), path = %entry.path().display(), "matched");
            let canonical = canonicalize(entry.path(), cache)
                .map_err(|e| ConfigError::inaccessible_pattern(pattern.source(), pattern.index(), e))?;
            matches.push(canonical);
        }
    }

    debug!(
        pattern = pattern.source(),
        visited,
        matched = matches.len(),
        "pattern walk complete"
    );
    Ok(matches)
}

/// A followed symlink whose target is gone
fn is_dangling_link(err: &walkdir::Error) -> bool {
    let target_missing = err
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);

    target_missing
        && err
            .path()
            .and_then(|path| fs::symlink_metadata(path).ok())
            .is_some_and(|metadata| metadata.file_type().is_symlink())
}

/// Hidden entries only match a pattern that spells out the leading dot, so
/// other patterns prune them from the walk
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Resolve a path to its canonical form, memoized across walks
fn canonicalize(path: &Path, cache: &CanonicalCache) -> io::Result<PathBuf> {
    if let Some(canonical) = cache.get(path) {
        return Ok(canonical.value().clone());
    }

    let canonical = fs::canonicalize(path)?;
    cache.insert(path.to_path_buf(), canonical.clone());
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use breeze_core::error::ConfigErrorKind;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<div class=\"p-4\"></div>").unwrap();
    }

    fn walk(root: &Path, raw: &str) -> ScanResult<Vec<PathBuf>> {
        let pattern = ContentPattern::parse(raw, 0, root).unwrap();
        walk_pattern(&pattern, &WalkLimits::default(), &CanonicalCache::new())
    }

    #[test]
    fn test_walk_sorted_and_canonical() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "src/b.rs");
        touch(root, "src/a.rs");
        touch(root, "src/ui/c.rs");

        let files = walk(root, "src/**/*.rs").unwrap();
        let canonical_root = fs::canonicalize(root).unwrap();
        assert_eq!(
            files,
            vec![
                canonical_root.join("src/a.rs"),
                canonical_root.join("src/b.rs"),
                canonical_root.join("src/ui/c.rs"),
            ]
        );
    }

    #[test]
    fn test_missing_base_matches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(walk(temp_dir.path(), "missing/**/*.rs").unwrap().is_empty());
        assert!(walk(temp_dir.path(), "missing.html").unwrap().is_empty());
    }

    #[test]
    fn test_literal_directory_matches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "src/main.rs");
        assert!(walk(temp_dir.path(), "src").unwrap().is_empty());
        assert_eq!(walk(temp_dir.path(), "src/main.rs").unwrap().len(), 1);
    }

    #[test]
    fn test_hidden_directories_pruned() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), ".git/hooks/pre-commit.rs");
        touch(temp_dir.path(), "lib.rs");
        let files = walk(temp_dir.path(), "**/*.rs").unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_dot_segment_reaches_hidden_directory() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "pkg/.storybook/preview.html");
        touch(temp_dir.path(), "pkg/.storybook/.draft.html");
        touch(temp_dir.path(), "pkg/index.html");

        let files = walk(temp_dir.path(), "**/.storybook/*.html").unwrap();
        let canonical_root = fs::canonicalize(temp_dir.path()).unwrap();
        assert_eq!(files, vec![canonical_root.join("pkg/.storybook/preview.html")]);

        let visible = walk(temp_dir.path(), "**/*.html").unwrap();
        assert_eq!(visible, vec![canonical_root.join("pkg/index.html")]);
    }

    #[test]
    fn test_entry_ceiling() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..10 {
            touch(temp_dir.path(), &format!("page{}.html", i));
        }
        let pattern = ContentPattern::parse("*.html", 0, temp_dir.path()).unwrap();
        let limits = WalkLimits { max_depth: MAX_WALK_DEPTH, max_entries: 3 };

        let err = walk_pattern(&pattern, &limits, &CanonicalCache::new()).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::MalformedPattern);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "site/index.html");
        std::os::unix::fs::symlink(root.join("site"), root.join("site/loop")).unwrap();

        let files = walk(root, "site/**/*.html").unwrap();
        assert_eq!(files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "index.html");
        touch(root, "pages/about.html");
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("stale-link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.html"), root.join("pages/stale.html")).unwrap();

        assert_eq!(walk(root, "*.html").unwrap().len(), 1);
        assert_eq!(walk(root, "**/*.html").unwrap().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_fails_with_source() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "index.html");
        let locked = temp_dir.path().join("locked");
        touch(temp_dir.path(), "locked/page.html");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read through the mode bits; nothing to check then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = walk(temp_dir.path(), "**/*.html");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result.unwrap_err() {
            ConfigError::MalformedPattern { index, source, .. } => {
                assert_eq!(index, 0);
                assert_eq!(source.map(|e| e.kind()), Some(io::ErrorKind::PermissionDenied));
            },
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_cache_is_populated() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.html");
        let pattern = ContentPattern::parse("*.html", 0, temp_dir.path()).unwrap();
        let cache = CanonicalCache::new();

        walk_pattern(&pattern, &WalkLimits::default(), &cache).unwrap();
        assert_eq!(cache.len(), 1);
    }
}
