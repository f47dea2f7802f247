//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking a [`CommandContext`]. Loading is
//! async (tokio fs); resolution itself is synchronous and parallelized with
//! rayon inside the resolver.

use std::path::PathBuf;

use breeze_config::{ConfigLoader, ConfigSource, RawConfig};
use breeze_core::error::{BreezeError, BreezeResult};
use breeze_core::types::DefaultTheme;
use breeze_resolver::ResolvedConfig;
use camino::Utf8PathBuf;
use tracing::{debug, info};

pub mod check;
pub mod files;
pub mod init;
pub mod resolve;
pub mod theme;


use crate::{output::OutputHandler, Commands};

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub default_theme: Option<PathBuf>,
    pub no_color: bool,
}

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    pub options: GlobalOptions,
    pub output: OutputHandler,
}

/// A loaded and resolved project
pub struct Project {
    pub source: ConfigSource,
    pub raw: RawConfig,
    pub root: PathBuf,
    pub resolved: ResolvedConfig,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new(options: GlobalOptions) -> BreezeResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| BreezeError::io("Failed to get current directory".to_string(), e))?;

        let output = if options.no_color {
            OutputHandler::plain()
        } else {
            OutputHandler::new()
        };

        Ok(Self { cwd, options, output })
    }

    /// Load the configuration named by `--config`, or search upwards for one
    pub async fn load_config(&self) -> BreezeResult<(RawConfig, ConfigSource)> {
        let loader = ConfigLoader::from_std(self.cwd.clone())?;
        match &self.options.config {
            Some(path) => {
                let path = Utf8PathBuf::try_from(path.clone()).map_err(|e| BreezeError::ConfigValidation {
                    field: "--config".to_string(),
                    reason: format!("path is not valid UTF-8: {}", e),
                })?;
                loader.load_file(&path).await
            },
            None => loader.load_project_config().await,
        }
    }

    /// The default theme from `--default-theme`, or the built-in baseline
    pub async fn load_default_theme(&self) -> BreezeResult<DefaultTheme> {
        let Some(path) = &self.options.default_theme else {
            return Ok(DefaultTheme::baseline());
        };

        let path = self.cwd.join(path);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| BreezeError::io(format!("Failed to read default theme {}", path.display()), e))?;
        DefaultTheme::from_json_str(&content, &path.to_string_lossy())
    }

    /// Directory content patterns resolve against: `--root`, else whatever
    /// the configuration asks for
    pub fn content_root(&self, raw: &RawConfig, source: &ConfigSource) -> BreezeResult<PathBuf> {
        if let Some(root) = &self.options.root {
            return Ok(self.cwd.join(root));
        }
        let loader = ConfigLoader::from_std(self.cwd.clone())?;
        Ok(loader.content_root(raw, source).into_std_path_buf())
    }

    /// Load and resolve the project configuration
    pub async fn resolve_project(&self) -> BreezeResult<Project> {
        let (raw, source) = self.load_config().await?;
        let default_theme = self.load_default_theme().await?;
        let root = self.content_root(&raw, &source)?;

        debug!(config = %source.path(), root = %root.display(), "resolving project");
        let resolved = breeze_resolver::resolve(&root, &raw, &default_theme)?;

        Ok(Project {
            source,
            raw,
            root,
            resolved,
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> BreezeResult<()> {
    match command {
        Commands::Resolve => {
            info!("Resolving configuration");
            resolve::execute(ctx).await
        },
        Commands::Files => {
            info!("Listing content files");
            files::execute(ctx).await
        },
        Commands::Theme { category } => {
            info!("Printing theme (category: {:?})", category);
            theme::execute(category, ctx).await
        },
        Commands::Check => {
            info!("Checking configuration");
            check::execute(ctx).await
        },
        Commands::Init { force } => {
            info!("Initializing breeze.toml (force: {})", force);
            init::execute(force, ctx).await
        },
        Commands::Version => show_version(ctx).await,
    }
}

/// Render a JSON value for stdout
pub(crate) fn to_pretty_json(value: &serde_json::Value) -> BreezeResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| BreezeError::ConfigValidation {
        field: "output".to_string(),
        reason: format!("cannot be rendered as JSON: {}", e),
    })
}

async fn show_version(ctx: &CommandContext) -> BreezeResult<()> {
    ctx.output.data(&format!("breeze {}", env!("CARGO_PKG_VERSION")));
    ctx.output.data(&format!("built:  {}", env!("BREEZE_BUILD_DATE")));
    ctx.output.data(&format!("target: {}", env!("BREEZE_BUILD_TARGET")));
    ctx.output.data(&format!("rustc:  {}", env!("BREEZE_RUSTC_VERSION")));
    Ok(())
}
