//! Sound player implementation using rodio.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::embedded::alert_wav;
use super::error::SoundError;
use super::handle::PlaybackHandle;
use super::session::SessionOptions;
use super::source::SoundSource;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking: `play` starts the alert and returns a
/// `PlaybackHandle` owning the sink, so the caller decides when the
/// resource is released.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
    /// Session hints recorded at construction.
    options: SessionOptions,
}

impl RodioSoundPlayer {
    /// Creates a new sound player, applying the session options.
    ///
    /// Options the output backend cannot honor are logged and retained as
    /// hints only; opening the stream is the session-configuration step and
    /// its failure is the only error path.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(options: &SessionOptions) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");
        if options.ducks_other_audio {
            debug!("Audio ducking requested; output backend has no ducking, hint ignored");
        }
        if options.plays_while_silenced {
            debug!("Silent-switch override requested; no silent switch on this platform");
        }

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(false),
            options: *options,
        })
    }

    /// Plays the alert from the given source.
    ///
    /// Non-blocking; the sound plays in the background while the caller
    /// holds the returned handle. If an asset file fails to open or decode,
    /// playback falls back to the embedded buzzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio sink cannot be created or the embedded
    /// fallback itself fails to decode.
    pub fn play(&self, source: &SoundSource) -> Result<PlaybackHandle, SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Sound playback disabled, skipping");
            return Ok(PlaybackHandle::silent());
        }

        match source {
            SoundSource::Asset { path, name } => {
                debug!("Playing alert asset: {}", name);
                match self.play_file(path) {
                    Ok(handle) => Ok(handle),
                    Err(e) if e.should_fall_back_to_embedded() => {
                        warn!(
                            "Failed to play alert asset '{}': {}, falling back to embedded",
                            name, e
                        );
                        self.play_embedded()
                    }
                    Err(e) => Err(e),
                }
            }
            SoundSource::Embedded { name } => {
                debug!("Playing embedded alert: {}", name);
                self.play_embedded()
            }
        }
    }

    /// Plays an alert file from the filesystem.
    fn play_file(&self, path: &std::path::Path) -> Result<PlaybackHandle, SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let reader = BufReader::new(file);
        let decoder = Decoder::new(reader).map_err(|e| SoundError::DecodeError(e.to_string()))?;

        self.play_decoder(decoder)
    }

    /// Plays the embedded buzzer.
    fn play_embedded(&self) -> Result<PlaybackHandle, SoundError> {
        let cursor = Cursor::new(alert_wav());
        let decoder = Decoder::new(cursor)
            .map_err(|e| SoundError::DecodeError(format!("embedded alert: {}", e)))?;

        self.play_decoder(decoder)
    }

    /// Starts playback of a decoded source and hands ownership to the caller.
    fn play_decoder<R>(&self, decoder: Decoder<R>) -> Result<PlaybackHandle, SoundError>
    where
        R: std::io::Read + std::io::Seek + Send + Sync + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        sink.append(decoder);

        debug!("Alert playback started");
        Ok(PlaybackHandle::from_sink(sink))
    }

    /// Returns the session hints recorded at construction.
    #[must_use]
    pub fn session_options(&self) -> &SessionOptions {
        &self.options
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }

    /// Returns true if the audio system is available.
    ///
    /// Always true once the player is constructed, as the output stream is
    /// opened during construction.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// Session-configuration failure degrades the app to silent: a warning is
/// logged and the countdown runs without an alert sound.
#[must_use]
pub fn try_create_player(options: &SessionOptions) -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new(options) {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, running silent: {}", e);
            None
        }
    }
}
