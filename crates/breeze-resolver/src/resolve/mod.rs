//! Resolution orchestrator
//!
//! A [`ConfigResolver`] runs once: `Loaded → Validating → {Resolved | Failed}`.
//! `resolve` consumes the resolver, so a failed resolution cannot be retried
//! or observed half-built.

use std::fmt;
use std::path::{Path, PathBuf};

use breeze_config::RawConfig;
use breeze_core::types::{DefaultTheme, FileSet};
use breeze_scan::{GlobMatcher, WalkLimits};
use tracing::{debug, info, warn};

use crate::plugin::{PluginCatalog, PluginEntry, PluginRegistry};
use crate::theme::{ResolvedTheme, ThemeMerger};
use crate::ResolverResult;

/// Lifecycle of a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Loaded,
    Validating,
    Resolved,
    Failed,
}

impl ResolutionState {
    /// Whether the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(self, next: ResolutionState) -> bool {
        use ResolutionState::*;
        matches!(
            (self, next),
            (Loaded, Validating) | (Validating, Resolved) | (Validating, Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ResolutionState::Resolved | ResolutionState::Failed)
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionState::Loaded => "loaded",
            ResolutionState::Validating => "validating",
            ResolutionState::Resolved => "resolved",
            ResolutionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Output of a successful resolution
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    files: FileSet,
    theme: ResolvedTheme,
    plugins: Vec<PluginEntry>,
}

impl ResolvedConfig {
    /// Canonical paths of every file to scan for class names
    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn theme(&self) -> &ResolvedTheme {
        &self.theme
    }

    /// Validated plugins in configuration order
    pub fn plugins(&self) -> &[PluginEntry] {
        &self.plugins
    }

    pub fn into_parts(self) -> (FileSet, ResolvedTheme, Vec<PluginEntry>) {
        (self.files, self.theme, self.plugins)
    }
}

/// Single-use resolver over borrowed, read-only inputs
#[derive(Debug)]
pub struct ConfigResolver<'a> {
    root: PathBuf,
    raw: &'a RawConfig,
    default_theme: &'a DefaultTheme,
    catalog: &'a PluginCatalog,
    limits: WalkLimits,
    state: ResolutionState,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(
        root: impl Into<PathBuf>,
        raw: &'a RawConfig,
        default_theme: &'a DefaultTheme,
        catalog: &'a PluginCatalog,
    ) -> Self {
        Self {
            root: root.into(),
            raw,
            default_theme,
            catalog,
            limits: WalkLimits::default(),
            state: ResolutionState::Loaded,
        }
    }

    /// Override the traversal ceilings used by the glob matcher
    pub fn with_limits(mut self, limits: WalkLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Run the resolution
    pub fn resolve(mut self) -> ResolverResult<ResolvedConfig> {
        self.transition(ResolutionState::Validating);

        match self.run() {
            Ok(resolved) => {
                self.transition(ResolutionState::Resolved);
                info!(
                    files = resolved.files.len(),
                    categories = resolved.theme.len(),
                    plugins = resolved.plugins.len(),
                    "configuration resolved"
                );
                Ok(resolved)
            },
            Err(e) => {
                self.transition(ResolutionState::Failed);
                warn!(kind = ?e.kind(), "configuration resolution failed: {}", e);
                Err(e)
            },
        }
    }

    fn run(&self) -> ResolverResult<ResolvedConfig> {
        let registry = PluginRegistry::register_all(&self.raw.plugins, self.catalog)?;

        let patterns = self.raw.content_patterns();
        if self.raw.content.is_none() {
            warn!("configuration has no `content` key; no files will be scanned");
        }

        let matcher = GlobMatcher::new(&self.root).with_limits(self.limits);
        let merger = ThemeMerger::new(self.default_theme);

        // Scanning and merging share no data.
        let (files, theme) = rayon::join(
            || matcher.match_patterns(patterns),
            || merger.merge(self.raw.theme.as_ref(), registry.entries()),
        );

        Ok(ResolvedConfig {
            files: files?,
            theme: theme?,
            plugins: registry.into_entries(),
        })
    }

    fn transition(&mut self, next: ResolutionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal resolution transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "resolution state");
        self.state = next;
    }
}

/// Resolve `raw` against `root` with no named plugins available
pub fn resolve(root: &Path, raw: &RawConfig, default_theme: &DefaultTheme) -> ResolverResult<ResolvedConfig> {
    resolve_with_catalog(root, raw, default_theme, &PluginCatalog::new())
}

/// Resolve `raw` against `root`, looking up named plugins in `catalog`
pub fn resolve_with_catalog(
    root: &Path,
    raw: &RawConfig,
    default_theme: &DefaultTheme,
    catalog: &PluginCatalog,
) -> ResolverResult<ResolvedConfig> {
    ConfigResolver::new(root, raw, default_theme, catalog).resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use breeze_config::ContentSpec;
    use breeze_core::error::ConfigErrorKind;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn raw(content: &[&str], theme: Option<serde_json::Value>, plugins: Vec<serde_json::Value>) -> RawConfig {
        RawConfig {
            content: Some(ContentSpec::Patterns(content.iter().map(|p| p.to_string()).collect())),
            theme,
            plugins,
        }
    }

    #[test]
    fn test_lifecycle_transitions() {
        use ResolutionState::*;
        let all = [Loaded, Validating, Resolved, Failed];
        let allowed = [(Loaded, Validating), (Validating, Resolved), (Validating, Failed)];

        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }

        assert!(Resolved.is_terminal());
        assert!(Failed.is_terminal());
        assert!(!Loaded.is_terminal());
        assert!(all.iter().filter(|s| s.is_terminal()).all(|s| all.iter().all(|n| !s.can_transition_to(*n))));
    }

    #[test]
    fn test_resolver_runs_once_on_either_outcome() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("index.html"), "").unwrap();
        let default_theme = DefaultTheme::baseline();
        let catalog = PluginCatalog::new();

        let ok = raw(&["*.html"], None, Vec::new());
        assert!(ConfigResolver::new(temp_dir.path(), &ok, &default_theme, &catalog)
            .resolve()
            .is_ok());

        let bad = raw(&["[abc"], None, Vec::new());
        assert!(ConfigResolver::new(temp_dir.path(), &bad, &default_theme, &catalog)
            .resolve()
            .is_err());
    }

    #[test]
    fn test_plugin_errors_fail_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let raw = raw(&["*.html"], None, vec![json!(42)]);
        let err = resolve(temp_dir.path(), &raw, &DefaultTheme::baseline()).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::InvalidPluginEntry);
    }

    #[test]
    fn test_scan_error_reported_before_theme_error() {
        let temp_dir = TempDir::new().unwrap();
        let raw = raw(&["[abc"], Some(json!("dark")), Vec::new());
        let err = resolve(temp_dir.path(), &raw, &DefaultTheme::baseline()).unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::MalformedPattern);
    }

    #[test]
    fn test_parts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("index.html"), "").unwrap();
        let raw = raw(&["*.html"], None, vec![json!({"rules": {}})]);

        let resolved = resolve(temp_dir.path(), &raw, &DefaultTheme::baseline()).unwrap();
        assert_eq!(resolved.files().len(), 1);
        assert_eq!(resolved.plugins().len(), 1);
        assert_eq!(resolved.theme(), DefaultTheme::baseline().as_theme());

        let (files, _, plugins) = resolved.into_parts();
        assert_eq!(files.len(), 1);
        assert_eq!(plugins[0].name(), "inline#0");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ResolutionState::Validating.to_string(), "validating");
        assert_eq!(ResolutionState::Failed.to_string(), "failed");
    }
}
