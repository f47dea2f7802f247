//! Compiled content patterns.
//!
//! A pattern is split into the literal directory it starts from (`base`) and
//! the wildcard remainder, which is matched against paths relative to `base`.
//! This keeps glob metacharacters in the project root from being interpreted.

use std::path::{Path, PathBuf};

use breeze_core::error::ConfigError;
use breeze_core::utils::{glob_base, normalize_path, strip_current_dir};
use glob::{MatchOptions, Pattern};

use crate::walk::MAX_WALK_DEPTH;
use crate::ScanResult;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A validated content pattern anchored at a concrete directory
#[derive(Debug, Clone)]
pub struct ContentPattern {
    /// Pattern as written by the user
    source: String,
    /// Position in the `content` list
    index: usize,
    /// `!pattern` removes matches instead of adding them
    negated: bool,
    /// Literal directory (or file) the pattern starts from
    base: PathBuf,
    /// Wildcard remainder; `None` when the whole pattern is a literal path
    remainder: Option<Pattern>,
    /// Deepest directory level the remainder can reach
    depth: usize,
    /// Remainder spells out a leading dot, so dot-entries can match
    dotted: bool,
}

impl ContentPattern {
    /// Validate and compile a pattern relative to `root`
    pub fn parse(raw: &str, index: usize, root: &Path) -> ScanResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::malformed_pattern(raw, index, "pattern is empty"));
        }

        let (negated, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let body = strip_current_dir(body);
        if body.is_empty() {
            return Err(ConfigError::malformed_pattern(raw, index, "pattern has no path after '!' or './'"));
        }

        Pattern::new(body).map_err(|e| {
            ConfigError::malformed_pattern(raw, index, format!("{} at position {}", e.msg, e.pos))
        })?;

        let body_path = Path::new(body);
        let literal = glob_base(body_path);
        let base = if body_path.is_absolute() {
            normalize_path(&literal)
        } else {
            normalize_path(&root.join(&literal))
        };

        let rest = body_path.strip_prefix(&literal).unwrap_or(body_path);
        let (remainder, depth, dotted) = if rest.as_os_str().is_empty() {
            (None, 0, false)
        } else {
            let rest_str = rest.to_string_lossy().replace('\\', "/");
            let compiled = Pattern::new(&rest_str).map_err(|e| {
                ConfigError::malformed_pattern(raw, index, format!("{} at position {}", e.msg, e.pos))
            })?;
            let depth = if rest_str.split('/').any(|component| component == "**") {
                MAX_WALK_DEPTH
            } else {
                rest.components().count()
            };
            let dotted = rest_str
                .split('/')
                .any(|component| component.starts_with('.') && component != "." && component != "..");
            (Some(compiled), depth, dotted)
        };

        Ok(Self {
            source: raw.to_string(),
            index,
            negated,
            base,
            remainder,
            depth,
            dotted,
        })
    }

    /// Pattern text as written in the configuration
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Position of the pattern in the `content` list
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Directory (or file, for literal patterns) traversal starts from
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Whether the pattern names a single literal path
    pub fn is_literal(&self) -> bool {
        self.remainder.is_none()
    }

    /// Maximum directory depth below `base` this pattern can match
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether a hidden file or directory below `base` can ever match
    pub fn reaches_hidden(&self) -> bool {
        self.dotted
    }

    /// Match a path relative to `base`
    pub fn matches(&self, relative: &Path) -> bool {
        match &self.remainder {
            Some(pattern) => pattern.matches_path_with(relative, MATCH_OPTIONS),
            None => relative.as_os_str().is_empty(),
        }
    }
}
