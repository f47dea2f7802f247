//! Configuration loading for Breeze
//!
//! This crate handles discovery and parsing of breeze.toml and
//! breeze.config.json files, producing the raw configuration object that the
//! resolver turns into a theme model and a set of files to scan.

pub mod json;
pub mod loader;
pub mod raw;
pub mod toml;

// Re-export main types
pub use crate::json::parse_json_config;
pub use loader::{ConfigLoader, ConfigSource, JSON_CONFIG_FILE, TOML_CONFIG_FILE};
pub use raw::{ContentSpec, RawConfig};
pub use crate::toml::{parse_toml_config, serialize_toml_config};

use breeze_core::error::BreezeError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, BreezeError>;
