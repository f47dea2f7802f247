//! `breeze check` command implementation.
//!
//! Resolves the configuration and prints a short summary. Any resolution
//! error is returned unchanged so the caller prints it with suggestions.

use breeze_core::error::BreezeResult;
use breeze_core::utils::display_relative;

use super::CommandContext;

/// Execute the `breeze check` command
pub async fn execute(ctx: &CommandContext) -> BreezeResult<()> {
    let project = ctx.resolve_project().await?;
    let resolved = &project.resolved;
    let theme = resolved.theme();

    ctx.output.info("Checking configuration...");
    ctx.output.field("config", &display_relative(project.source.path().as_std_path(), &ctx.cwd));
    ctx.output.field("root", &project.root.display().to_string());
    ctx.output.field("patterns", &project.raw.content_patterns().len().to_string());
    ctx.output.field("files", &resolved.files().len().to_string());
    ctx.output.field(
        "theme",
        &format!("{} categories, {} tokens", theme.len(), theme.token_count()),
    );

    for entry in resolved.plugins() {
        ctx.output.field(
            &format!("plugin #{}", entry.index()),
            &format!("{} ({})", entry.name(), entry.capabilities()),
        );
    }

    if resolved.files().is_empty() {
        ctx.output.warn("No files matched; generated CSS will be empty");
    }

    ctx.output.success("Configuration is valid");
    Ok(())
}
