//! Slider ranges, timer cadence and the bundled demo recording.

use serde::Deserialize;

/// The two continuous controls on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Amplitude,
    Frequency,
}

/// Closed value range of a slider
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range (NaN maps to `min`)
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Position of `value` within the range, 0.0 at `min` and 1.0 at `max`
    pub fn to_fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / span
    }

    /// Inverse of `to_fraction`; fractions outside 0..=1 are clamped
    pub fn from_fraction(&self, fraction: f64) -> f64 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.min + (self.max - self.min) * fraction
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Control surface parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlParams {
    /// Amplitude slider range (linear gain)
    pub amplitude_range: SliderRange,

    /// Frequency slider range (Hz)
    pub frequency_range: SliderRange,

    /// Amplitude at startup
    pub initial_amplitude: f64,

    /// Frequency at startup (Hz)
    pub initial_frequency: f64,

    /// Record/playback timer period (milliseconds)
    /// 100 = ten slider samples per second
    pub tick_interval_ms: u64,

    /// Keyboard nudge step as a fraction of the slider range
    pub nudge_step: f64,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            amplitude_range: SliderRange::new(0.0, 5.0),
            frequency_range: SliderRange::new(0.0, 1500.0),
            initial_amplitude: 0.5,
            initial_frequency: 0.5,
            tick_interval_ms: 100,
            nudge_step: 0.02,
        }
    }
}

impl ControlParams {
    pub fn range(&self, slider: Slider) -> SliderRange {
        match slider {
            Slider::Amplitude => self.amplitude_range,
            Slider::Frequency => self.frequency_range,
        }
    }

    /// Validate configuration (ranges non-empty, timer running, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.amplitude_range.is_valid() {
            return Err(format!(
                "amplitude range must satisfy min < max, got {:?}",
                self.amplitude_range
            ));
        }
        if !self.frequency_range.is_valid() {
            return Err(format!(
                "frequency range must satisfy min < max, got {:?}",
                self.frequency_range
            ));
        }
        if self.amplitude_range.min < 0.0 || self.frequency_range.min < 0.0 {
            return Err("slider ranges must not go below zero".to_string());
        }
        if self.tick_interval_ms == 0 {
            return Err("tick interval must be > 0 ms".to_string());
        }
        if !(self.nudge_step > 0.0 && self.nudge_step <= 1.0) {
            return Err(format!(
                "nudge step must be within (0, 1], got {}",
                self.nudge_step
            ));
        }
        Ok(())
    }
}

/// Example gesture recording shipped with the app.
///
/// The two sequences have different lengths on purpose; playback walks
/// each one with its own wrapping index.
pub mod demo {
    /// Recorded frequencies (Hz), one per timer tick
    pub const FREQUENCIES: [f64; 39] = [
        1500.0, 1259.0, 959.0, 877.0, 938.6, 1129.0, 936.0, 568.0, 620.0, 754.0, 839.6, 629.0,
        375.0, 547.0, 658.0, 492.0, 320.0, 509.0, 471.6, 207.0, 191.0, 209.0, 134.0, 153.0,
        153.0, 136.0, 0.0, 0.0, 33.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ];

    /// Recorded amplitudes, one per timer tick
    pub const AMPLITUDES: [f64; 31] = [
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.6, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.6, 1.0,
        1.0, 1.0, 2.0, 1.0, 1.6, 1.0, 1.0, 1.0, 0.0, 0.6, 0.0, 0.0, 0.0,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_range_fraction_mapping() {
        let range = SliderRange::new(0.0, 1500.0);

        assert_eq!(range.to_fraction(750.0), 0.5);
        assert_eq!(range.from_fraction(0.2), 300.0);
        assert_eq!(range.from_fraction(-1.0), 0.0);
        assert_eq!(range.from_fraction(3.0), 1500.0);
        assert_eq!(range.clamp(f64::NAN), 0.0);
        assert_eq!(range.to_fraction(2000.0), 1.0);
    }

    #[test]
    fn test_default_params_validate() {
        let params = ControlParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.range(Slider::Amplitude), SliderRange::new(0.0, 5.0));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let mut params = ControlParams::default();
        params.tick_interval_ms = 0;
        assert!(params.validate().is_err());

        let mut params = ControlParams::default();
        params.frequency_range = SliderRange::new(10.0, 10.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_demo_values_within_default_ranges() {
        let params = ControlParams::default();
        assert!(demo::FREQUENCIES
            .iter()
            .all(|&f| params.frequency_range.clamp(f) == f));
        assert!(demo::AMPLITUDES
            .iter()
            .all(|&a| params.amplitude_range.clamp(a) == a));
    }
}
