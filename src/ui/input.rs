//! Input handling for the timer screen.
//!
//! Terminal events are read on a dedicated thread (crossterm reads block)
//! and forwarded into the UI loop's channel. Key-to-action mapping is a
//! pure function so the bindings are testable without a terminal.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::debug;

// ============================================================================
// Actions
// ============================================================================

/// User intents the timer screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start a countdown of the given preset minutes
    StartPreset(u32),
    /// Add one minute (or start a one-minute countdown when idle)
    Extend,
    /// Stop the countdown
    Stop,
    /// Toggle alert sound on/off
    ToggleSound,
    /// Leave the application
    Quit,
}

/// Events forwarded from the terminal to the UI loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press
    Key(KeyEvent),
    /// The terminal was resized to (width, height)
    Resize(u16, u16),
}

// ============================================================================
// Key map
// ============================================================================

/// Maps a key event to an action.
///
/// `5`/`6`/`7`/`0` are the preset buttons (`0` starts ten minutes), `+` is
/// the extend control, `s` or Space stops, `m` toggles sound, `q`/Esc/
/// Ctrl-C quits. Release and repeat events are ignored.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('5') => Some(Action::StartPreset(5)),
        KeyCode::Char('6') => Some(Action::StartPreset(6)),
        KeyCode::Char('7') => Some(Action::StartPreset(7)),
        KeyCode::Char('0') => Some(Action::StartPreset(10)),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Extend),
        KeyCode::Char('s') | KeyCode::Char(' ') => Some(Action::Stop),
        KeyCode::Char('m') => Some(Action::ToggleSound),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

// ============================================================================
// Reader thread
// ============================================================================

/// Spawns the blocking terminal reader.
///
/// The thread forwards key and resize events until the receiving side goes
/// away or the terminal read fails; both end the thread quietly.
pub fn spawn_reader(tx: mpsc::UnboundedSender<InputEvent>) {
    std::thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(Event::Key(key)) => {
                if tx.send(InputEvent::Key(key)).is_err() {
                    break;
                }
            }
            Ok(Event::Resize(width, height)) => {
                if tx.send(InputEvent::Resize(width, height)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                debug!("Terminal read failed, stopping input thread: {}", e);
                break;
            }
        }
    });
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_preset_keys() {
        assert_eq!(
            action_for_key(press(KeyCode::Char('5'))),
            Some(Action::StartPreset(5))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('6'))),
            Some(Action::StartPreset(6))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('7'))),
            Some(Action::StartPreset(7))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('0'))),
            Some(Action::StartPreset(10))
        );
    }

    #[test]
    fn test_extend_keys() {
        assert_eq!(action_for_key(press(KeyCode::Char('+'))), Some(Action::Extend));
        assert_eq!(action_for_key(press(KeyCode::Char('='))), Some(Action::Extend));
    }

    #[test]
    fn test_stop_keys() {
        assert_eq!(action_for_key(press(KeyCode::Char('s'))), Some(Action::Stop));
        assert_eq!(action_for_key(press(KeyCode::Char(' '))), Some(Action::Stop));
    }

    #[test]
    fn test_sound_toggle_key() {
        assert_eq!(
            action_for_key(press(KeyCode::Char('m'))),
            Some(Action::ToggleSound)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unmapped_keys_do_nothing() {
        assert_eq!(action_for_key(press(KeyCode::Char('x'))), None);
        assert_eq!(action_for_key(press(KeyCode::Char('1'))), None);
        assert_eq!(action_for_key(press(KeyCode::Enter)), None);
        assert_eq!(action_for_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut key = press(KeyCode::Char('5'));
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for_key(key), None);
    }
}
