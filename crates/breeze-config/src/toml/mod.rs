//! breeze.toml parsing and serialization

use std::ops::Range;

use breeze_core::error::BreezeError;
use tracing::debug;

use crate::{raw::RawConfig, ConfigResult};

/// Parse a breeze.toml document.
///
/// `file` is only used in error messages.
pub fn parse_toml_config(content: &str, file: &str) -> ConfigResult<RawConfig> {
    // First try with toml_edit for better syntax error reporting
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| located_error(content, file, e.message(), e.span()))?;

    // Then parse with serde for type safety
    let config: RawConfig = toml::from_str(content)
        .map_err(|e| located_error(content, file, e.message(), e.span()))?;

    debug!(
        file,
        patterns = config.content_patterns().len(),
        plugins = config.plugins.len(),
        "parsed TOML config"
    );
    Ok(config)
}

/// Serialize a RawConfig to a breeze.toml document
pub fn serialize_toml_config(config: &RawConfig) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| BreezeError::ConfigValidation {
        field: "config".to_string(),
        reason: format!("cannot be written as TOML: {}", e),
    })
}

/// Build a TomlParse error with a 1-based line and column
fn located_error(content: &str, file: &str, message: &str, span: Option<Range<usize>>) -> BreezeError {
    let (line, column) = span
        .map(|span| line_column(content, span.start))
        .unwrap_or((0, 0));

    BreezeError::TomlParse {
        file: file.to_string(),
        message: message.trim().to_string(),
        line,
        column,
    }
}

/// Translate a byte offset into a 1-based (line, column) pair
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map(|newline| before[newline + 1..].chars().count())
        .unwrap_or_else(|| before.chars().count())
        + 1;
    (line, column)
}
