//! `breeze files` command implementation.

use breeze_core::error::BreezeResult;

use super::CommandContext;

/// Print every content file, one canonical path per line, in match order
pub async fn execute(ctx: &CommandContext) -> BreezeResult<()> {
    let project = ctx.resolve_project().await?;
    let files = project.resolved.files();

    if files.is_empty() {
        ctx.output.warn("No files matched the configured content patterns");
        return Ok(());
    }

    for path in files {
        ctx.output.data(&path.display().to_string());
    }
    Ok(())
}
