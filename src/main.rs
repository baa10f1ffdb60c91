//! Brush Timer CLI - two minutes of toothbrushing for kids
//!
//! The session is split into 8 zones of 15 seconds:
//! - outer faces first, upper right then around the mouth
//! - inner faces next, in the same order
//! - a little tune at the end

use anyhow::Result;
use clap::{CommandFactory, Parser};

use brush_timer::cli::{Cli, Commands, Display, RunArgs};
use brush_timer::types::{BrushConfig, ZONES};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            brush_timer::session::run(BrushConfig::from(&args)).await?;
        }
        None => {
            brush_timer::session::run(BrushConfig::from(&RunArgs::default())).await?;
        }
        Some(Commands::Zones { json }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ZONES)?);
            } else {
                Display::show_zones();
            }
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
