//! Content scanning for Breeze
//!
//! Resolves the `content` glob patterns of a configuration against the
//! filesystem into a deduplicated set of canonical file paths. Patterns are
//! walked in parallel and merged afterwards in declaration order.

pub mod matcher;
pub mod pattern;
pub mod walk;

// Re-export main types
pub use matcher::GlobMatcher;
pub use pattern::ContentPattern;
pub use walk::{WalkLimits, MAX_VISITED_ENTRIES, MAX_WALK_DEPTH};

use breeze_core::error::ConfigError;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ConfigError>;
