//! Countdown controller.
//!
//! Owns the timer state and everything stateful around it: at most one
//! decrement source, at most one retained playback handle, and the epoch
//! that ties ticks to their registration. User input and ticker output both
//! funnel through here; the state transitions themselves live in
//! `types::TimerState`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, warn};

use crate::sound::{PlaybackHandle, SoundPlayer, SoundSource};
use crate::types::{TickOutcome, TimerState};

use super::ticker::{self, TickEvent, TickerHandle};

// ============================================================================
// Constants
// ============================================================================

/// Period of the countdown decrement source.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events surfaced to the UI loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A countdown started (or restarted)
    Started {
        /// Remaining seconds of the fresh countdown
        remaining_seconds: u32,
    },
    /// A running countdown was extended by one minute
    Extended {
        /// Remaining seconds after the extension
        remaining_seconds: u32,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// The countdown reached zero; the alert has been triggered
    Expired,
    /// The countdown was stopped by the user
    Stopped,
}

// ============================================================================
// TimerController
// ============================================================================

/// Countdown controller: timer state plus its scheduling and audio effects.
///
/// Dropping the controller cancels the active decrement source and releases
/// any retained playback handle, each exactly once.
pub struct TimerController {
    /// Current countdown state
    state: TimerState,
    /// Audio player; `None` when audio initialization failed at startup
    player: Option<Arc<dyn SoundPlayer>>,
    /// The alert to play at expiry
    alert_source: SoundSource,
    /// Most recent playback resource, retained until replaced or dropped
    playback: Option<PlaybackHandle>,
    /// The active decrement source, if any
    ticker: Option<TickerHandle>,
    /// Channel the decrement source delivers ticks on
    tick_tx: mpsc::UnboundedSender<TickEvent>,
    /// Tick period (injectable for tests)
    tick_period: Duration,
    /// Current registration epoch; ticks from older epochs are stale
    epoch: u64,
}

impl TimerController {
    /// Creates an idle controller.
    ///
    /// `tick_tx` is the sending side of the channel the owner selects on;
    /// every registered decrement source delivers its ticks there.
    pub fn new(
        player: Option<Arc<dyn SoundPlayer>>,
        alert_source: SoundSource,
        tick_tx: mpsc::UnboundedSender<TickEvent>,
    ) -> Self {
        Self {
            state: TimerState::new(),
            player,
            alert_source,
            playback: None,
            ticker: None,
            tick_tx,
            tick_period: TICK_PERIOD,
            epoch: 0,
        }
    }

    /// Overrides the tick period. Intended for tests.
    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Starts a countdown of the given number of minutes.
    ///
    /// Starting while already running restarts from the new duration; the
    /// previous decrement source is always canceled before the new one is
    /// registered, so at most one is ever active.
    pub fn start(&mut self, minutes: u32) -> TimerEvent {
        self.state.start(minutes);
        self.register_ticker();

        debug!("Countdown started: {} minutes", minutes);
        TimerEvent::Started {
            remaining_seconds: self.state.remaining_seconds,
        }
    }

    /// Adds one minute to the countdown.
    ///
    /// While running this leaves the decrement source untouched; while idle
    /// it behaves exactly like a one-minute start.
    pub fn extend(&mut self) -> TimerEvent {
        if self.state.is_running() {
            self.state.extend();
            debug!(
                "Countdown extended to {} seconds",
                self.state.remaining_seconds
            );
            TimerEvent::Extended {
                remaining_seconds: self.state.remaining_seconds,
            }
        } else {
            self.start(1)
        }
    }

    /// Stops the countdown and resets to idle. Idempotent; never fires the
    /// alert.
    pub fn stop(&mut self) -> TimerEvent {
        self.cancel_ticker();
        self.state.stop();

        debug!("Countdown stopped");
        TimerEvent::Stopped
    }

    /// Applies one tick from the decrement source.
    ///
    /// Ticks carrying an outdated epoch were queued by a source that has
    /// since been canceled and are discarded — this is what keeps a restart
    /// from double-decrementing. Expiry cancels the source and triggers the
    /// alert exactly once.
    pub fn handle_tick(&mut self, tick: TickEvent) -> Option<TimerEvent> {
        if tick.epoch != self.epoch {
            debug!(
                "Discarding stale tick (epoch {} != {})",
                tick.epoch, self.epoch
            );
            return None;
        }

        match self.state.tick()? {
            TickOutcome::Ticked { remaining_seconds } => {
                Some(TimerEvent::Tick { remaining_seconds })
            }
            TickOutcome::Expired => {
                self.cancel_ticker();
                self.fire_alert();
                Some(TimerEvent::Expired)
            }
        }
    }

    /// Returns the current countdown state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns true if a countdown is actively decrementing.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Returns the remaining seconds of the current countdown.
    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Returns the current registration epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Plays the alert and retains the playback resource.
    ///
    /// Any previously retained resource is released first. Failures are
    /// logged and swallowed; the countdown has already returned to idle and
    /// the zero readout is the remaining feedback.
    fn fire_alert(&mut self) {
        if let Some(previous) = self.playback.take() {
            previous.release();
        }

        let Some(player) = &self.player else {
            debug!("No audio player, alert skipped");
            return;
        };

        match player.play(&self.alert_source) {
            Ok(handle) => self.playback = Some(handle),
            Err(e) => warn!("Alert playback failed: {}", e),
        }
    }

    /// Cancel-then-register: supersede any active decrement source, then
    /// register a fresh one under a new epoch.
    fn register_ticker(&mut self) {
        self.cancel_ticker();
        self.ticker = Some(ticker::spawn(
            self.tick_period,
            self.epoch,
            self.tick_tx.clone(),
        ));
    }

    /// Cancels the active decrement source, if any, and invalidates any of
    /// its ticks still in flight.
    fn cancel_ticker(&mut self) {
        self.epoch += 1;
        if let Some(handle) = self.ticker.take() {
            handle.cancel();
        }
    }
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("ticker", &self.ticker)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::MockSoundPlayer;
    use crate::types::TimerPhase;

    const TEST_PERIOD: Duration = Duration::from_millis(10);

    fn create_controller() -> (
        TimerController,
        Arc<MockSoundPlayer>,
        mpsc::UnboundedReceiver<TickEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let player = Arc::new(MockSoundPlayer::new());
        let controller = TimerController::new(
            Some(player.clone() as Arc<dyn SoundPlayer>),
            SoundSource::embedded("buzzer"),
            tx,
        )
        .with_tick_period(TEST_PERIOD);
        (controller, player, rx)
    }

    /// A tick carrying the controller's current epoch.
    fn current_tick(controller: &TimerController) -> TickEvent {
        TickEvent {
            epoch: controller.epoch(),
        }
    }

    // ------------------------------------------------------------------------
    // Transition Tests
    // ------------------------------------------------------------------------

    mod transition_tests {
        use super::*;

        #[tokio::test]
        async fn test_start_sets_state() {
            let (mut controller, _player, _rx) = create_controller();

            let event = controller.start(5);

            assert_eq!(
                event,
                TimerEvent::Started {
                    remaining_seconds: 300
                }
            );
            assert!(controller.is_running());
            assert_eq!(controller.remaining_seconds(), 300);
        }

        #[tokio::test]
        async fn test_start_then_stop_resets() {
            let (mut controller, _player, _rx) = create_controller();

            controller.start(5);
            let event = controller.stop();

            assert_eq!(event, TimerEvent::Stopped);
            assert!(!controller.is_running());
            assert_eq!(controller.remaining_seconds(), 0);
        }

        #[tokio::test]
        async fn test_stop_is_idempotent() {
            let (mut controller, _player, _rx) = create_controller();

            assert_eq!(controller.stop(), TimerEvent::Stopped);
            assert_eq!(controller.stop(), TimerEvent::Stopped);
            assert_eq!(controller.remaining_seconds(), 0);
        }

        #[tokio::test]
        async fn test_extend_while_running() {
            let (mut controller, _player, _rx) = create_controller();
            controller.start(5);
            controller.state.remaining_seconds = 30;

            let event = controller.extend();

            assert_eq!(
                event,
                TimerEvent::Extended {
                    remaining_seconds: 90
                }
            );
            assert!(controller.is_running());
        }

        #[tokio::test]
        async fn test_extend_while_idle_acts_like_start_one() {
            let (mut controller, _player, _rx) = create_controller();

            let event = controller.extend();

            assert_eq!(
                event,
                TimerEvent::Started {
                    remaining_seconds: 60
                }
            );
            assert!(controller.is_running());
            assert_eq!(controller.remaining_seconds(), 60);
        }

        #[tokio::test]
        async fn test_start_while_running_replaces() {
            let (mut controller, _player, _rx) = create_controller();
            controller.start(5);
            controller.state.remaining_seconds = 120;

            let event = controller.start(6);

            assert_eq!(
                event,
                TimerEvent::Started {
                    remaining_seconds: 360
                }
            );
            assert_eq!(controller.remaining_seconds(), 360);
        }

        #[tokio::test]
        async fn test_tick_decrements() {
            let (mut controller, _player, _rx) = create_controller();
            controller.start(5);

            let event = controller.handle_tick(current_tick(&controller));

            assert_eq!(
                event,
                Some(TimerEvent::Tick {
                    remaining_seconds: 299
                })
            );
        }

        #[tokio::test]
        async fn test_tick_while_idle_is_ignored() {
            let (mut controller, _player, _rx) = create_controller();

            let event = controller.handle_tick(current_tick(&controller));

            assert_eq!(event, None);
            assert_eq!(controller.state(), &TimerState::new());
        }
    }

    // ------------------------------------------------------------------------
    // Epoch Guard Tests
    // ------------------------------------------------------------------------

    mod epoch_tests {
        use super::*;

        #[tokio::test]
        async fn test_stale_tick_is_discarded() {
            let (mut controller, _player, _rx) = create_controller();
            controller.start(5);
            let stale = current_tick(&controller);

            // Restart supersedes the first ticker; its epoch is now stale
            controller.start(6);
            let event = controller.handle_tick(stale);

            assert_eq!(event, None);
            assert_eq!(controller.remaining_seconds(), 360);
        }

        #[tokio::test]
        async fn test_restart_decrements_exactly_once_per_tick() {
            let (mut controller, _player, _rx) = create_controller();
            controller.start(5);
            let stale = current_tick(&controller);
            controller.start(6);

            // One stale tick and one current tick: only the current one counts
            controller.handle_tick(stale);
            controller.handle_tick(current_tick(&controller));

            assert_eq!(controller.remaining_seconds(), 359);
        }

        #[tokio::test]
        async fn test_epoch_advances_on_stop() {
            let (mut controller, _player, _rx) = create_controller();
            controller.start(5);
            let before = controller.epoch();

            controller.stop();

            assert!(controller.epoch() > before);
        }
    }

    // ------------------------------------------------------------------------
    // Expiry and Alert Tests
    // ------------------------------------------------------------------------

    mod expiry_tests {
        use super::*;

        #[tokio::test]
        async fn test_expiry_transitions_to_idle_and_plays_alert_once() {
            let (mut controller, player, _rx) = create_controller();
            controller.start(5);
            controller.state.remaining_seconds = 1;

            let event = controller.handle_tick(current_tick(&controller));

            assert_eq!(event, Some(TimerEvent::Expired));
            assert_eq!(controller.state().phase, TimerPhase::Idle);
            assert_eq!(controller.remaining_seconds(), 0);
            assert_eq!(player.play_count(), 1);
        }

        #[tokio::test]
        async fn test_no_further_ticks_after_expiry() {
            let (mut controller, player, _rx) = create_controller();
            controller.start(5);
            controller.state.remaining_seconds = 1;
            let tick = current_tick(&controller);
            controller.handle_tick(tick);

            // Expiry canceled the ticker; a straggler from it is stale
            let event = controller.handle_tick(tick);

            assert_eq!(event, None);
            assert_eq!(player.play_count(), 1);
        }

        #[tokio::test]
        async fn test_stop_never_fires_alert() {
            let (mut controller, player, _rx) = create_controller();
            controller.start(5);

            controller.stop();

            assert_eq!(player.play_count(), 0);
        }

        #[tokio::test]
        async fn test_playback_failure_is_swallowed() {
            let (mut controller, player, _rx) = create_controller();
            player.set_should_fail(true);
            controller.start(5);
            controller.state.remaining_seconds = 1;

            let event = controller.handle_tick(current_tick(&controller));

            // Countdown still transitions to idle despite the audio failure
            assert_eq!(event, Some(TimerEvent::Expired));
            assert_eq!(controller.state().phase, TimerPhase::Idle);
        }

        #[tokio::test]
        async fn test_missing_player_skips_alert() {
            let (tx, _rx) = mpsc::unbounded_channel();
            let mut controller =
                TimerController::new(None, SoundSource::embedded("buzzer"), tx)
                    .with_tick_period(TEST_PERIOD);
            controller.start(5);
            controller.state.remaining_seconds = 1;

            let event = controller.handle_tick(current_tick(&controller));

            assert_eq!(event, Some(TimerEvent::Expired));
        }

        #[tokio::test]
        async fn test_new_alert_releases_previous_handle() {
            let (mut controller, player, _rx) = create_controller();

            // First expiry
            controller.start(5);
            controller.state.remaining_seconds = 1;
            controller.handle_tick(current_tick(&controller));
            assert_eq!(player.release_count(), 0);

            // Second expiry replaces the retained handle
            controller.start(5);
            controller.state.remaining_seconds = 1;
            controller.handle_tick(current_tick(&controller));

            assert_eq!(player.play_count(), 2);
            assert_eq!(player.release_count(), 1);
        }
    }

    // ------------------------------------------------------------------------
    // Disposal Tests
    // ------------------------------------------------------------------------

    mod disposal_tests {
        use super::*;

        #[tokio::test]
        async fn test_drop_releases_playback_exactly_once() {
            let (mut controller, player, _rx) = create_controller();
            controller.start(5);
            controller.state.remaining_seconds = 1;
            controller.handle_tick(current_tick(&controller));
            assert_eq!(player.release_count(), 0);

            drop(controller);

            assert_eq!(player.release_count(), 1);
        }

        #[tokio::test]
        async fn test_drop_while_running_stops_ticks() {
            let (mut controller, _player, mut rx) = create_controller();
            controller.start(5);

            drop(controller);
            tokio::time::sleep(TEST_PERIOD * 3).await;

            while rx.try_recv().is_ok() {}
            tokio::time::sleep(TEST_PERIOD * 3).await;
            assert!(rx.try_recv().is_err(), "no ticks after disposal");
        }
    }
}
