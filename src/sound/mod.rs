//! Sound playback system for the countdown alert.
//!
//! This module provides the audio side of the timer:
//!
//! - Session configuration at startup, with graceful degradation to silent
//! - Non-blocking alert playback returning an owned `PlaybackHandle`
//! - A bundled-asset alert with an embedded buzzer fallback
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │ play(&SoundSource) -> PlaybackHandle
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  Bundled asset   │
//! │                  │     │  (assets/...)    │
//! │                  │     ├──────────────────┤
//! │                  │────▶│ Embedded buzzer  │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```
//!
//! Playback failures never escape into the countdown state machine; the
//! controller logs them and the timer degrades to "no sound".

mod embedded;
mod error;
mod handle;
mod player;
mod session;
mod source;

pub use embedded::{alert_format, alert_wav};
pub use error::SoundError;
pub use handle::PlaybackHandle;
pub use player::{try_create_player, RodioSoundPlayer};
pub use session::SessionOptions;
pub use source::{resolve_alert, SoundSource};

/// Trait for sound playback implementations.
///
/// Abstracts the audio backend so the controller can be exercised with a
/// mock in tests.
pub trait SoundPlayer {
    /// Starts playback of the given source, returning the owning handle.
    ///
    /// This method must be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot be started.
    fn play(&self, source: &SoundSource) -> Result<PlaybackHandle, SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<PlaybackHandle, SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: std::sync::Mutex<Vec<SoundSource>>,
    releases: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    available: std::sync::atomic::AtomicBool,
    disabled: std::sync::atomic::AtomicBool,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: std::sync::Mutex::new(Vec::new()),
            releases: std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0)),
            available: std::sync::atomic::AtomicBool::new(true),
            disabled: std::sync::atomic::AtomicBool::new(false),
            should_fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available
            .store(available, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Number of playbacks started.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    /// Number of handles released so far (explicitly or on drop).
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.releases.load(std::sync::atomic::Ordering::SeqCst)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<PlaybackHandle, SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(std::sync::atomic::Ordering::SeqCst) {
            return Ok(PlaybackHandle::silent());
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(PlaybackHandle::tracking(self.releases.clone()))
    }

    fn is_available(&self) -> bool {
        self.available.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled
            .store(false, std::sync::atomic::Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}
