//! Playback resource handles.
//!
//! Each alert playback hands back a `PlaybackHandle` that owns the
//! underlying audio sink. The handle is released exactly once: either
//! explicitly via `release`, or on drop. The controller retains the most
//! recent handle and lets replacement or teardown release the previous one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rodio::Sink;
use tracing::debug;

// ============================================================================
// PlaybackHandle
// ============================================================================

/// Single-ownership handle to one alert playback.
pub struct PlaybackHandle {
    /// Audio sink driving the playback; `None` for silent/mock playback.
    sink: Option<Sink>,
    /// Release counter shared with the mock player, for tests.
    release_counter: Option<Arc<AtomicUsize>>,
}

impl PlaybackHandle {
    /// Wraps a live audio sink.
    pub(crate) fn from_sink(sink: Sink) -> Self {
        Self {
            sink: Some(sink),
            release_counter: None,
        }
    }

    /// Creates a handle that produced no audio (disabled playback).
    pub(crate) fn silent() -> Self {
        Self {
            sink: None,
            release_counter: None,
        }
    }

    /// Creates a mock handle that bumps `counter` once when released.
    pub(crate) fn tracking(counter: Arc<AtomicUsize>) -> Self {
        Self {
            sink: None,
            release_counter: Some(counter),
        }
    }

    /// Returns true if the playback has finished (or never produced audio).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.sink.as_ref().map_or(true, Sink::empty)
    }

    /// Stops playback and releases the underlying resource.
    ///
    /// Consuming `self` makes a second release unrepresentable; dropping an
    /// already-released handle does nothing further.
    pub fn release(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            debug!("Playback resource released");
        }
        if let Some(counter) = self.release_counter.take() {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for PlaybackHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackHandle")
            .field("live", &self.sink.is_some())
            .field("finished", &self.is_finished())
            .finish()
    }
}
