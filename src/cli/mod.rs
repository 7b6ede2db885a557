//! CLI module for the countdown timer.
//!
//! This module provides the command-line surface:
//! - `commands`: startup flags and the completions subcommand, via clap

pub mod commands;

pub use commands::{Cli, Commands};
