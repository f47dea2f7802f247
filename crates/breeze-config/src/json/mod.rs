//! breeze.config.json parsing

use breeze_core::error::BreezeError;
use tracing::debug;

use crate::{raw::RawConfig, ConfigResult};

/// Parse a breeze.config.json document
pub fn parse_json_config(content: &str, file: &str) -> ConfigResult<RawConfig> {
    let config: RawConfig = serde_json::from_str(content).map_err(|e| BreezeError::JsonParse {
        file: file.to_string(),
        message: e.to_string(),
    })?;

    debug!(
        file,
        patterns = config.content_patterns().len(),
        plugins = config.plugins.len(),
        "parsed JSON config"
    );
    Ok(config)
}
