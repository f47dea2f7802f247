//! `breeze init` command implementation.
//!
//! Writes a starter breeze.toml in the current directory.

use breeze_config::{serialize_toml_config, RawConfig, TOML_CONFIG_FILE};
use breeze_core::error::{BreezeError, BreezeResult};

use super::CommandContext;

/// Execute the `breeze init` command
pub async fn execute(force: bool, ctx: &CommandContext) -> BreezeResult<()> {
    let config_path = ctx.cwd.join(TOML_CONFIG_FILE);

    if config_path.exists() && !force {
        ctx.output.info("breeze.toml already exists, skipping initialization");
        ctx.output.info("Pass --force to overwrite it.");
        return Ok(());
    }

    let content = serialize_toml_config(&RawConfig::starter())?;
    tokio::fs::write(&config_path, content)
        .await
        .map_err(|e| BreezeError::io(format!("Failed to write {}", config_path.display()), e))?;

    ctx.output.success(&format!("Created {}", TOML_CONFIG_FILE));
    ctx.output.info("");
    ctx.output.info("Next steps:");
    ctx.output.info("  edit `content` to list your templates");
    ctx.output.info("  breeze check");

    Ok(())
}
