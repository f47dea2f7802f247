//! Glob matcher: content patterns to a deduplicated FileSet

use std::fs;
use std::path::{Path, PathBuf};

use breeze_core::types::FileSet;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::pattern::ContentPattern;
use crate::walk::{walk_pattern, CanonicalCache, WalkLimits};
use crate::ScanResult;

/// Resolves content patterns against a project root
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    /// Directory relative patterns are anchored at
    root: PathBuf,
    /// Traversal ceilings
    limits: WalkLimits,
}

impl GlobMatcher {
    /// Create a matcher rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        // A root that cannot be canonicalized simply yields no matches later.
        let root = fs::canonicalize(&root).unwrap_or(root);
        Self {
            root,
            limits: WalkLimits::default(),
        }
    }

    /// Override the traversal ceilings
    pub fn with_limits(mut self, limits: WalkLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Project root patterns resolve against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate every pattern, failing on the first malformed one in list order
    pub fn compile(&self, patterns: &[String]) -> ScanResult<Vec<ContentPattern>> {
        patterns
            .iter()
            .enumerate()
            .map(|(index, raw)| ContentPattern::parse(raw, index, &self.root))
            .collect()
    }

    /// Resolve patterns into a FileSet.
    ///
    /// Include patterns are walked in parallel and merged in declaration order,
    /// so the result is deterministic. Files matched by any `!pattern` are
    /// removed afterwards.
    pub fn match_patterns(&self, patterns: &[String]) -> ScanResult<FileSet> {
        let compiled = self.compile(patterns)?;
        if compiled.is_empty() {
            warn!(root = %self.root.display(), "no content patterns configured; nothing will be scanned");
            return Ok(FileSet::new());
        }

        let (excludes, includes): (Vec<_>, Vec<_>) =
            compiled.into_iter().partition(ContentPattern::is_negated);

        let cache = CanonicalCache::new();
        let mut files = FileSet::new();
        for matched in self.walk_all(&includes, &cache) {
            files.extend(matched?);
        }

        let mut excluded = 0usize;
        for matched in self.walk_all(&excludes, &cache) {
            for path in matched? {
                if files.remove(&path) {
                    excluded += 1;
                }
            }
        }

        info!(
            root = %self.root.display(),
            patterns = patterns.len(),
            files = files.len(),
            excluded,
            "content scan complete"
        );
        Ok(files)
    }

    /// Walk patterns in parallel; results come back in input order
    fn walk_all(
        &self,
        patterns: &[ContentPattern],
        cache: &CanonicalCache,
    ) -> Vec<ScanResult<Vec<PathBuf>>> {
        debug!(count = patterns.len(), "walking patterns");
        patterns
            .par_iter()
            .map(|pattern| walk_pattern(pattern, &self.limits, cache))
            .collect()
    }
}
