//! Configuration resolution engine for Breeze
//!
//! Turns a raw configuration into one immutable [`ResolvedConfig`]: the set of
//! files to scan for class names, the merged theme, and the validated plugin
//! list, in precedence order.

pub mod plugin;
pub mod resolve;
pub mod theme;

// Re-export main types
pub use plugin::{
    Capabilities, DeclarativePlugin, Plugin, PluginCatalog, PluginEntry, PluginReference,
    PluginRegistry, RuleSet,
};
pub use resolve::{resolve, resolve_with_catalog, ConfigResolver, ResolutionState, ResolvedConfig};
pub use theme::{ResolvedTheme, ThemeMerger, ThemeOp, ThemeStep};

use breeze_core::error::ConfigError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, ConfigError>;
