//! # breeze-core
//!
//! Core types and utilities shared across all Breeze crates.
//!
//! This crate provides:
//! - Theme and FileSet types consumed by the resolver and the generator
//! - BreezeError and ConfigError enums for unified error handling
//! - Path helpers used by the content scanner
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Theme, DefaultTheme, FileSet)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{BreezeError, BreezeResult, ConfigError, ConfigErrorKind};
pub use types::{DefaultTheme, FileSet, Theme, TokenMap};
