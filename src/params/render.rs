//! Window and output capture configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Window configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width (logical pixels)
    pub width: u32,

    /// Window height (logical pixels)
    pub height: u32,

    /// Prefix shown before the status line in the title bar
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 420,
            height: 560,
            title: "SliderSynth".to_string(),
        }
    }
}

/// Capture of the synthesized output to a WAV file
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Destination file
    pub path: PathBuf,

    /// Bits per sample (32-bit float)
    pub bits_per_sample: u16,
}

impl CaptureConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bits_per_sample: 32,
        }
    }

    /// WAV header for the given stream layout
    pub fn wav_spec(&self, channels: u16, sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: hound::SampleFormat::Float,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_spec_matches_stream() {
        let capture = CaptureConfig::new("out.wav");
        let spec = capture.wav_spec(2, 48000);

        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(spec.bits_per_sample, 32);
        assert_eq!(spec.sample_format, hound::SampleFormat::Float);
    }
}
