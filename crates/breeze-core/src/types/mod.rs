//! Core data types for Breeze.
//!
//! This module provides the fundamental types used throughout the workspace:
//! - Theme types for design tokens
//! - The platform default theme
//! - The deduplicated set of files to scan

pub mod file_set;
pub mod theme;

// Re-export all public types
pub use file_set::FileSet;
pub use theme::{value_kind, DefaultTheme, Theme, TokenMap};
