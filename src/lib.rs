//! Buzzer - a single-screen terminal countdown timer.
//!
//! This library provides the full functionality of the timer:
//! - Countdown state machine with preset, extend, stop, and tick transitions
//! - A cancelable once-per-second decrement source
//! - Alert sound playback with an embedded fallback and graceful
//!   degradation to silent
//! - Responsive readout sizing driven by the terminal viewport
//! - The interactive screen and its key bindings
//! - CLI flag parsing and shell completions

pub mod cli;
pub mod layout;
pub mod sound;
pub mod timer;
pub mod types;
pub mod ui;

// Re-export commonly used types for convenience
pub use types::{
    format_display, TickOutcome, TimerPhase, TimerState, EXTEND_SECONDS, PRESET_MINUTES,
};

// Re-export timer engine types
pub use timer::{TickEvent, TickerHandle, TimerController, TimerEvent, TICK_PERIOD};

// Re-export sound types
pub use sound::{
    resolve_alert, try_create_player, MockSoundPlayer, PlaybackHandle, RodioSoundPlayer,
    SessionOptions, SoundError, SoundPlayer, SoundSource,
};

// Re-export layout types
pub use layout::{current_viewport, readout_height, Orientation, Viewport};

// Re-export the UI surface
pub use ui::{App, InputEvent};
