//! `breeze resolve` command implementation.
//!
//! Prints the resolved configuration as one JSON document.

use breeze_core::error::BreezeResult;
use breeze_resolver::ResolvedConfig;
use serde_json::{json, Value};

use super::{to_pretty_json, CommandContext};

/// Execute the `breeze resolve` command
pub async fn execute(ctx: &CommandContext) -> BreezeResult<()> {
    let project = ctx.resolve_project().await?;
    ctx.output.data(&to_pretty_json(&render(&project.resolved))?);
    Ok(())
}

/// JSON view of a resolved configuration
pub fn render(resolved: &ResolvedConfig) -> Value {
    let plugins: Vec<Value> = resolved
        .plugins()
        .iter()
        .map(|entry| {
            json!({
                "index": entry.index(),
                "name": entry.name(),
                "capabilities": entry.capabilities(),
            })
        })
        .collect();

    let files: Vec<String> = resolved
        .files()
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();

    json!({
        "files": files,
        "theme": resolved.theme(),
        "plugins": plugins,
    })
}
