//! # breeze-cli
//!
//! Command-line front end for Breeze: loads `breeze.toml` (or
//! `breeze.config.json`), resolves it and prints the files to scan, the
//! merged theme or a validation summary.

use std::path::PathBuf;
use std::process::ExitCode;

use breeze_core::error::{BreezeError, BreezeResult};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{CommandContext, GlobalOptions};
use output::colors::ColorSupport;
use output::errors::ErrorFormatter;

/// Resolve Breeze configuration into files to scan and a theme
#[derive(Parser)]
#[command(name = "breeze", version, about = "Breeze configuration resolver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file to use instead of searching upwards
    #[arg(short, long, global = true, env = "BREEZE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory content patterns resolve against
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// JSON file replacing the built-in default theme
    #[arg(long, global = true, value_name = "FILE")]
    pub default_theme: Option<PathBuf>,

    /// Disable colored output (same as setting NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the resolved configuration as JSON
    Resolve,
    /// List the files that will be scanned for class names
    Files,
    /// Print the resolved theme, or a single category
    Theme {
        category: Option<String>,
    },
    /// Validate the configuration and print a summary
    Check,
    /// Write a starter breeze.toml in the current directory
    Init {
        /// Overwrite an existing breeze.toml
        #[arg(long)]
        force: bool,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting Breeze CLI v{}", env!("CARGO_PKG_VERSION"));

    let formatter = if cli.no_color {
        ErrorFormatter::with_colors(ColorSupport::disabled())
    } else {
        ErrorFormatter::new()
    };

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", formatter.format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> BreezeResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BreezeError::io("Failed to create async runtime".to_string(), e))?;

    let options = GlobalOptions {
        config: cli.config,
        root: cli.root,
        default_theme: cli.default_theme,
        no_color: cli.no_color,
    };

    rt.block_on(async {
        let ctx = CommandContext::new(options).await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "breeze_cli={level},breeze_config={level},breeze_scan={level},breeze_resolver={level}"
        ))
    });

    // stdout carries command output (JSON, file lists)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Breeze encountered an unexpected error: {}", panic_info);
        eprintln!("Breeze crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/breeze-css/breeze/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
