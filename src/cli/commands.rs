//! Command definitions for the countdown timer CLI.
//!
//! Uses clap derive macro for argument parsing. The app itself is
//! interactive; the flags only shape startup.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Buzzer - a single-screen countdown timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "buzzer",
    version,
    about = "ターミナル用カウントダウンタイマー",
    long_about = "プリセット時間（5/6/7/10分）を1キーで選んでカウントダウンする\n\
                  シングルスクリーンのタイマー。ゼロになるとブザーが鳴ります。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Start counting down immediately with the given minutes (1-120)
    #[arg(
        short,
        long,
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    pub start: Option<u32>,

    /// Disable the alert sound
    #[arg(long)]
    pub no_sound: bool,

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
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Tests
// ============================================================================
