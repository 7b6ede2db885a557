//! Interactive timer screen.
//!
//! One screen for the whole app: a large countdown readout, the preset
//! buttons, and a status line. The event loop selects over terminal input
//! and decrement-source ticks; everything stateful is delegated to the
//! `TimerController`.

pub mod digits;
pub mod input;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::layout::{self, Viewport};
use crate::sound::SoundPlayer;
use crate::timer::{TickEvent, TimerController};
use crate::types::format_display;

pub use input::{Action, InputEvent};

// ============================================================================
// App
// ============================================================================

/// State of the timer screen.
pub struct App {
    /// The countdown controller
    controller: TimerController,
    /// Audio player, shared with the controller, for the mute toggle
    player: Option<Arc<dyn SoundPlayer>>,
    /// Latest known terminal dimensions
    viewport: Viewport,
    /// Set when the user asks to leave
    should_quit: bool,
}

impl App {
    /// Creates the screen around a controller.
    pub fn new(controller: TimerController, player: Option<Arc<dyn SoundPlayer>>) -> Self {
        Self {
            controller,
            player,
            viewport: layout::current_viewport(),
            should_quit: false,
        }
    }

    /// Starts a countdown immediately (the `--start` flag).
    pub fn start(&mut self, minutes: u32) {
        self.controller.start(minutes);
    }

    /// Applies one user action.
    fn apply(&mut self, action: Action) {
        match action {
            Action::StartPreset(minutes) => {
                self.controller.start(minutes);
            }
            Action::Extend => {
                self.controller.extend();
            }
            Action::Stop => {
                self.controller.stop();
            }
            Action::ToggleSound => {
                if let Some(player) = &self.player {
                    if player.is_disabled() {
                        player.enable();
                    } else {
                        player.disable();
                    }
                }
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    /// Handles one terminal event.
    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => {
                if let Some(action) = input::action_for_key(key) {
                    self.apply(action);
                }
            }
            InputEvent::Resize(width, height) => {
                self.viewport = Viewport::new(width, height);
            }
        }
    }

    /// Handles one tick from the decrement source.
    fn handle_tick(&mut self, tick: TickEvent) {
        self.controller.handle_tick(tick);
    }

    /// Draws the screen.
    fn render(&self, frame: &mut Frame) {
        let readout_rows = layout::readout_height(self.viewport);
        let scale = digits::scale_for_height(readout_rows);
        let readout = digits::render(
            &format_display(self.controller.remaining_seconds()),
            scale,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(readout.len() as u16),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(frame.size());

        let readout_style = if self.controller.is_running() {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(readout.join("\n"))
                .alignment(Alignment::Center)
                .style(readout_style),
            chunks[1],
        );

        frame.render_widget(
            Paragraph::new(self.controls_line()).alignment(Alignment::Center),
            chunks[3],
        );

        frame.render_widget(
            Paragraph::new(self.status_line())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            chunks[4],
        );
    }

    /// The two-line control legend under the readout.
    fn controls_line(&self) -> String {
        let presets = "[5] 5分   [6] 6分   [7] 7分   [0] 10分";
        let controls = if self.controller.is_running() {
            "[+] +1分   [s] 停止   [m] サウンド   [q] 終了"
        } else {
            "[+] 1分開始   [m] サウンド   [q] 終了"
        };
        format!("{}\n{}", presets, controls)
    }

    /// The status line at the bottom of the screen.
    fn status_line(&self) -> String {
        let phase = if self.controller.is_running() {
            "カウントダウン中"
        } else {
            "停止中"
        };
        let sound = match &self.player {
            Some(player) if player.is_disabled() => "サウンド: オフ",
            Some(_) => "サウンド: オン",
            None => "サウンド: 利用不可",
        };
        format!("{}   {}", phase, sound)
    }
}

// ============================================================================
// Event loop
// ============================================================================

/// Runs the timer screen until the user quits.
///
/// Sets up the terminal (raw mode + alternate screen), runs the event
/// loop, and restores the terminal before returning — also on error.
pub async fn run(
    app: App,
    input_rx: mpsc::UnboundedReceiver<InputEvent>,
    tick_rx: mpsc::UnboundedReceiver<TickEvent>,
) -> Result<()> {
    enable_raw_mode().context("端末をrawモードにできませんでした")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("画面の初期化に失敗しました")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("端末の初期化に失敗しました")?;

    let result = run_loop(&mut terminal, app, input_rx, tick_rx).await;

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// The select loop: redraw, then wait for the next input or tick.
async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut input_rx: mpsc::UnboundedReceiver<InputEvent>,
    mut tick_rx: mpsc::UnboundedReceiver<TickEvent>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            event = input_rx.recv() => match event {
                Some(event) => app.handle_input(event),
                // Reader thread gone; nothing can reach us anymore
                None => break,
            },
            Some(tick) = tick_rx.recv() => app.handle_tick(tick),
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::{MockSoundPlayer, SoundSource};
    use ratatui::backend::TestBackend;

    fn create_app() -> (App, Arc<MockSoundPlayer>, mpsc::UnboundedReceiver<TickEvent>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let player = Arc::new(MockSoundPlayer::new());
        let controller = TimerController::new(
            Some(player.clone() as Arc<dyn SoundPlayer>),
            SoundSource::embedded("buzzer"),
            tick_tx,
        );
        (App::new(controller, Some(player.clone())), player, tick_rx)
    }

    mod action_tests {
        use super::*;

        #[tokio::test]
        async fn test_preset_action_starts_countdown() {
            let (mut app, _player, _tick_rx) = create_app();

            app.apply(Action::StartPreset(5));

            assert!(app.controller.is_running());
            assert_eq!(app.controller.remaining_seconds(), 300);
        }

        #[tokio::test]
        async fn test_stop_action() {
            let (mut app, _player, _tick_rx) = create_app();
            app.apply(Action::StartPreset(5));

            app.apply(Action::Stop);

            assert!(!app.controller.is_running());
            assert_eq!(app.controller.remaining_seconds(), 0);
        }

        #[tokio::test]
        async fn test_extend_action_while_idle() {
            let (mut app, _player, _tick_rx) = create_app();

            app.apply(Action::Extend);

            assert!(app.controller.is_running());
            assert_eq!(app.controller.remaining_seconds(), 60);
        }

        #[tokio::test]
        async fn test_toggle_sound_action() {
            let (mut app, player, _tick_rx) = create_app();
            assert!(!player.is_disabled());

            app.apply(Action::ToggleSound);
            assert!(player.is_disabled());

            app.apply(Action::ToggleSound);
            assert!(!player.is_disabled());
        }

        #[tokio::test]
        async fn test_quit_action() {
            let (mut app, _player, _tick_rx) = create_app();

            app.apply(Action::Quit);

            assert!(app.should_quit);
        }
    }

    mod input_tests {
        use super::*;

        #[tokio::test]
        async fn test_resize_updates_viewport() {
            let (mut app, _player, _tick_rx) = create_app();

            app.handle_input(InputEvent::Resize(120, 30));

            assert_eq!(app.viewport, Viewport::new(120, 30));
        }
    }

    mod render_tests {
        use super::*;

        #[test]
        fn test_render_smoke() {
            let (app, _player, _tick_rx) = create_app();
            let backend = TestBackend::new(80, 24);
            let mut terminal = Terminal::new(backend).unwrap();

            terminal.draw(|frame| app.render(frame)).unwrap();
        }

        #[test]
        fn test_render_survives_tiny_terminal() {
            let (app, _player, _tick_rx) = create_app();
            let backend = TestBackend::new(3, 2);
            let mut terminal = Terminal::new(backend).unwrap();

            terminal.draw(|frame| app.render(frame)).unwrap();
        }

        #[tokio::test]
        async fn test_status_line_reflects_state() {
            let (mut app, player, _tick_rx) = create_app();
            assert!(app.status_line().contains("停止中"));
            assert!(app.status_line().contains("サウンド: オン"));

            app.apply(Action::StartPreset(5));
            assert!(app.status_line().contains("カウントダウン中"));

            player.disable();
            assert!(app.status_line().contains("サウンド: オフ"));
        }

        #[tokio::test]
        async fn test_controls_line_shows_stop_only_while_running() {
            let (mut app, _player, _tick_rx) = create_app();
            assert!(!app.controls_line().contains("停止"));

            app.apply(Action::StartPreset(5));
            assert!(app.controls_line().contains("停止"));
        }
    }
}
