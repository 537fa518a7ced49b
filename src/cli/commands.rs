//! Command definitions for the focus timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::app::AppConfig;
use crate::sound::AudioCue;

// ============================================================================
// CLI Structure
// ============================================================================

/// Focus Timer - a terminal work/break interval timer
#[derive(Parser, Debug)]
#[command(
    name = "focus-timer",
    version,
    about = "作業25分・休憩5分のインターバルタイマー",
    long_about = "ターミナル上で動作するシンプルなインターバルタイマー。\n\
                  作業と休憩の終了をメロディーでお知らせします。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer
    Run(RunArgs),

    /// Play a completion cue and wait until it ends
    Cue {
        /// Cue to play
        #[arg(value_enum)]
        cue: CueArg,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Disable completion cues
    #[arg(long)]
    pub no_sound: bool,

    /// Print one JSON snapshot per state change instead of the status view
    #[arg(long)]
    pub json: bool,
}

impl From<&RunArgs> for AppConfig {
    fn from(args: &RunArgs) -> Self {
        Self {
            sound_enabled: !args.no_sound,
            json: args.json,
        }
    }
}

/// Cue names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueArg {
    /// Descending melody played when work ends
    WorkComplete,
    /// Ascending melody played when a break ends
    BreakComplete,
}

impl From<CueArg> for AudioCue {
    fn from(arg: CueArg) -> Self {
        match arg {
            CueArg::WorkComplete => AudioCue::WorkComplete,
            CueArg::BreakComplete => AudioCue::BreakComplete,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
