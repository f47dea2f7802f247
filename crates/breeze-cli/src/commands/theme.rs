//! `breeze theme` command implementation.

use breeze_core::error::{BreezeError, BreezeResult};
use breeze_core::types::Theme;
use serde_json::Value;

use super::{to_pretty_json, CommandContext};

/// Print the resolved theme, or only `category` when given
pub async fn execute(category: Option<String>, ctx: &CommandContext) -> BreezeResult<()> {
    let project = ctx.resolve_project().await?;
    let value = select(project.resolved.theme(), category.as_deref())?;
    ctx.output.data(&to_pretty_json(&value)?);
    Ok(())
}

/// The whole theme or one category as JSON
pub fn select(theme: &Theme, category: Option<&str>) -> BreezeResult<Value> {
    match category {
        None => serde_json::to_value(theme).map_err(|e| BreezeError::ConfigValidation {
            field: "theme".to_string(),
            reason: format!("cannot be rendered as JSON: {}", e),
        }),
        Some(name) => theme
            .category(name)
            .map(|tokens| Value::Object(tokens.clone()))
            .ok_or_else(|| {
                let known: Vec<&str> = theme.categories().map(|(name, _)| name.as_str()).collect();
                BreezeError::ConfigValidation {
                    field: "category".to_string(),
                    reason: format!("unknown theme category '{}' (known: {})", name, known.join(", ")),
                }
            }),
    }
}
