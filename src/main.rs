//! Buzzer - a single-screen countdown timer for the terminal
//!
//! Pick a preset (5/6/7/10 minutes), watch the countdown, and a buzzer
//! sounds at zero. `+` adds a minute to a running countdown.

use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;

use buzzer::cli::{Cli, Commands};
use buzzer::sound::{self, SessionOptions, SoundPlayer};
use buzzer::timer::TimerController;
use buzzer::ui::{self, App};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute
    if let Err(e) = execute(cli).await {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never land inside the alternate screen.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Wires the timer together and runs the screen.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    // Audio session is configured once at startup; failure means the timer
    // simply runs silent
    let player = sound::try_create_player(&SessionOptions::default());
    if cli.no_sound {
        if let Some(player) = &player {
            player.disable();
        }
    }
    let player: Option<Arc<dyn SoundPlayer>> = player.map(|p| p as Arc<dyn SoundPlayer>);

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();

    let controller = TimerController::new(player.clone(), sound::resolve_alert(), tick_tx);
    let mut app = App::new(controller, player);
    if let Some(minutes) = cli.start {
        app.start(minutes);
    }

    ui::input::spawn_reader(input_tx);
    ui::run(app, input_rx, tick_rx).await
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
