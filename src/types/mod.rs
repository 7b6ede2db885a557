//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Timer phase and state management
//! - The four countdown transitions (start / extend / stop / tick)
//! - Display formatting for the countdown readout

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerPhase {
    /// No countdown is active
    #[default]
    Idle,
    /// A countdown is actively decrementing
    Running,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
        }
    }

    /// Returns true if a countdown is actively decrementing.
    pub fn is_running(&self) -> bool {
        matches!(self, TimerPhase::Running)
    }
}

// ============================================================================
// Presets
// ============================================================================

/// Preset durations offered as one-tap controls, in minutes.
pub const PRESET_MINUTES: &[u32] = &[5, 6, 7, 10];

/// Seconds added by the extend control.
pub const EXTEND_SECONDS: u32 = 60;

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of applying one tick to a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown decremented and is still running.
    Ticked {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// The countdown reached zero and returned to idle.
    Expired,
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the countdown.
///
/// The state is mutated only through the four transitions below. Scheduling
/// and audio side effects live in the controller; these methods are pure
/// over the state value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Remaining seconds in the current countdown
    pub remaining_seconds: u32,
}

impl TimerState {
    /// Creates a new TimerState in idle state.
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_seconds: 0,
        }
    }

    /// Starts a countdown of the given number of minutes.
    ///
    /// Starting while already running replaces the countdown entirely; the
    /// previous remaining time is discarded.
    pub fn start(&mut self, minutes: u32) {
        self.phase = TimerPhase::Running;
        self.remaining_seconds = minutes * 60;
    }

    /// Adds one minute to a running countdown.
    ///
    /// When idle, behaves identically to `start(1)` — the control doubles as
    /// "start a one-minute timer" and "add a minute to a running timer".
    pub fn extend(&mut self) {
        if self.phase.is_running() {
            self.remaining_seconds += EXTEND_SECONDS;
        } else {
            self.start(1);
        }
    }

    /// Stops the countdown and resets to idle. Idempotent.
    pub fn stop(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = 0;
    }

    /// Applies one tick to the countdown.
    ///
    /// Returns `None` when the timer is idle (a spurious tick mutates
    /// nothing). Reaching zero transitions back to idle in the same call, so
    /// `remaining_seconds == 0` with `Running` is never observable after a
    /// tick.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.phase.is_running() {
            return None;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
        }

        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Idle;
            Some(TickOutcome::Expired)
        } else {
            Some(TickOutcome::Ticked {
                remaining_seconds: self.remaining_seconds,
            })
        }
    }

    /// Returns true if a countdown is actively decrementing.
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Display formatting
// ============================================================================

/// Formats remaining seconds as a zero-padded `MM:SS` readout.
///
/// Minutes are not capped at 59 — 600 seconds renders as `10:00` and very
/// long countdowns simply widen the minutes field. No locale variants.
pub fn format_display(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
