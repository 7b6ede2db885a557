//! Embedded alert sound.
//!
//! Fallback used when no bundled alert asset is present on disk. The sample
//! data is rendered once at first use instead of being checked in as a
//! binary blob: a short three-pulse square-wave buzzer in 16-bit PCM WAV.

use std::sync::OnceLock;

/// Sample rate of the rendered alert, in Hz.
const SAMPLE_RATE: u32 = 44_100;

/// Buzzer tone frequency, in Hz.
const TONE_HZ: u32 = 880;

/// Length of each buzzer pulse, in milliseconds.
const PULSE_MS: u32 = 180;

/// Gap between pulses, in milliseconds.
const GAP_MS: u32 = 90;

/// Number of pulses in the alert.
const PULSE_COUNT: u32 = 3;

/// Peak amplitude of the square wave.
const AMPLITUDE: i16 = 9_000;

/// Returns the embedded alert as WAV bytes, rendering it on first use.
pub fn alert_wav() -> &'static [u8] {
    static WAV: OnceLock<Vec<u8>> = OnceLock::new();
    WAV.get_or_init(render_alert_wav)
}

/// Returns the format description of the embedded alert.
#[must_use]
pub const fn alert_format() -> &'static str {
    "WAV (16-bit PCM, 44.1kHz, Mono)"
}

/// Renders the buzzer waveform into a complete WAV file.
fn render_alert_wav() -> Vec<u8> {
    let pulse_samples = SAMPLE_RATE * PULSE_MS / 1000;
    let gap_samples = SAMPLE_RATE * GAP_MS / 1000;

    let mut samples: Vec<i16> = Vec::new();
    for pulse in 0..PULSE_COUNT {
        for n in 0..pulse_samples {
            // Square wave: flip sign every half period
            let half_periods = n * TONE_HZ * 2 / SAMPLE_RATE;
            let value = if half_periods % 2 == 0 {
                AMPLITUDE
            } else {
                -AMPLITUDE
            };
            samples.push(value);
        }
        if pulse + 1 < PULSE_COUNT {
            samples.extend(std::iter::repeat(0).take(gap_samples as usize));
        }
    }

    encode_wav(&samples)
}

/// Wraps mono 16-bit samples in a RIFF/WAVE container.
fn encode_wav(samples: &[i16]) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let byte_rate = SAMPLE_RATE * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }

    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_wav_exists() {
        let data = alert_wav();
        assert!(!data.is_empty());
    }

    #[test]
    fn test_alert_wav_has_riff_header() {
        let data = alert_wav();
        assert_eq!(&data[0..4], b"RIFF");
    }

    #[test]
    fn test_alert_wav_has_wave_format() {
        let data = alert_wav();
        assert_eq!(&data[8..12], b"WAVE");
    }

    #[test]
    fn test_alert_wav_has_fmt_chunk() {
        let data = alert_wav();
        assert_eq!(&data[12..16], b"fmt ");
    }

    #[test]
    fn test_alert_wav_riff_size_is_consistent() {
        let data = alert_wav();
        let riff_size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        assert_eq!(riff_size as usize, data.len() - 8);
    }

    #[test]
    fn test_alert_wav_contains_audio_data() {
        let data = alert_wav();
        let data_len = u32::from_le_bytes([data[40], data[41], data[42], data[43]]);
        assert!(data_len > 0, "alert must not be silent");
        assert_eq!(data.len(), 44 + data_len as usize);
    }

    #[test]
    fn test_alert_wav_is_cached() {
        let first = alert_wav().as_ptr();
        let second = alert_wav().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_alert_format_description() {
        let format = alert_format();
        assert!(format.contains("WAV"));
        assert!(format.contains("PCM"));
    }
}
