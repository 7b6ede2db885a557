//! Decrement source for the countdown.
//!
//! A registered ticker is a spawned task that delivers one `TickEvent` per
//! period through an mpsc channel. The returned handle cancels the task
//! idempotently and also cancels on drop, so a ticker can never outlive its
//! owner. Every registration carries an epoch so a tick already queued by a
//! superseded ticker can be recognized and discarded.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

// ============================================================================
// TickEvent
// ============================================================================

/// One tick of the decrement source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// Registration epoch of the ticker that produced this tick.
    pub epoch: u64,
}

// ============================================================================
// TickerHandle
// ============================================================================

/// Handle to a registered decrement source.
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Cancels the decrement source. Safe to call more than once.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Returns true once the underlying task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for TickerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerHandle")
            .field("finished", &self.is_finished())
            .finish()
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Registers a recurring decrement source.
///
/// The first tick fires one full period after registration; sending stops
/// as soon as the receiving side is gone.
pub fn spawn(period: Duration, epoch: u64, tx: mpsc::UnboundedSender<TickEvent>) -> TickerHandle {
    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // interval yields immediately on the first call; consume it so the
        // fresh readout holds for a full period before the first decrement
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if tx.send(TickEvent { epoch }).is_err() {
                break;
            }
        }
    });

    TickerHandle { task }
}

// ============================================================================
// Tests
// ============================================================================
