//! Audio session options.
//!
//! The session is configured once at startup: keep playing while the
//! platform is silenced, keep playing in the background, duck other audio.
//! The desktop output backend honors none of these directly, so they are
//! accepted as hints: recorded on the player and logged when they cannot
//! take effect. Configuration failures never propagate past the player
//! constructor.

// ============================================================================
// SessionOptions
// ============================================================================

/// Hints applied when the audio output stream is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Keep playing while the platform is silenced (hardware mute switch)
    pub plays_while_silenced: bool,
    /// Keep the session active while the app is in the background
    pub continues_in_background: bool,
    /// Lower the volume of other audio during alert playback
    pub ducks_other_audio: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            plays_while_silenced: true,
            continues_in_background: true,
            ducks_other_audio: true,
        }
    }
}

impl SessionOptions {
    /// Creates options with the specified silenced-playback behavior.
    pub fn with_plays_while_silenced(mut self, value: bool) -> Self {
        self.plays_while_silenced = value;
        self
    }

    /// Creates options with the specified background behavior.
    pub fn with_continues_in_background(mut self, value: bool) -> Self {
        self.continues_in_background = value;
        self
    }

    /// Creates options with the specified ducking behavior.
    pub fn with_ducks_other_audio(mut self, value: bool) -> Self {
        self.ducks_other_audio = value;
        self
    }
}
