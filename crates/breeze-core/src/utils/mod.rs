//! Utility functions and helpers.
//!
//! Common functionality used across multiple Breeze crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{display_relative, glob_base, has_glob_meta, normalize_path, strip_current_dir};
