//! Audio engine configuration and constants.

use serde::Deserialize;

/// Audio output and voice configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioParams {
    /// Hard clip level applied to every output sample
    /// 0.5 keeps the 0-5 amplitude slider from blasting full scale
    pub output_limit: f32,

    /// Secondary voice frequency as a multiple of the primary (2.0 = octave up)
    pub secondary_ratio: f64,

    /// Secondary voice gain relative to the primary amplitude
    /// 0.0 = mixed in but silent
    pub secondary_level: f64,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            output_limit: 0.5,
            secondary_ratio: 2.0,
            secondary_level: 0.0,
        }
    }
}

impl AudioParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.output_limit > 0.0 && self.output_limit <= 1.0) {
            return Err(format!(
                "output limit must be within (0, 1], got {}",
                self.output_limit
            ));
        }
        if !(self.secondary_ratio.is_finite() && self.secondary_ratio > 0.0) {
            return Err(format!(
                "secondary ratio must be > 0, got {}",
                self.secondary_ratio
            ));
        }
        if !(self.secondary_level.is_finite() && self.secondary_level >= 0.0) {
            return Err(format!(
                "secondary level must be >= 0, got {}",
                self.secondary_level
            ));
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;
}
