//! Focus Timer CLI - a terminal interval timer
//!
//! Alternates between two fixed intervals:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//!
//! A melody marks the end of each interval and completed work sessions
//! are counted.

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};

use focus_timer::app::{self, AppConfig};
use focus_timer::cli::{Cli, Commands, Display, RunArgs};
use focus_timer::sound::{self, AudioCue};

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
///
/// Logs go to stderr so they never mix with the JSON stream on stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            app::run(AppConfig::from(&args)).await?;
        }
        Some(Commands::Cue { cue }) => {
            let cue = AudioCue::from(cue);
            sound::play_cue_to_end(cue)
                .await
                .map_err(|e| anyhow!("{} ({})", e, e.suggestion()))?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            app::run(AppConfig::from(&RunArgs::default())).await?;
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
