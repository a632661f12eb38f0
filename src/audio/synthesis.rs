//! Glicol composition for the two mixed oscillators.

use crate::params::AudioParams;

/// Amplitude and frequency of one sine voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    pub amplitude: f64,
    pub frequency_hz: f64,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            amplitude: 0.0,
            frequency_hz: 0.0,
        }
    }
}

impl VoiceParams {
    /// Secondary voice derived from the primary one
    pub fn secondary(&self, params: &AudioParams) -> Self {
        Self {
            amplitude: self.amplitude * params.secondary_level,
            frequency_hz: self.frequency_hz * params.secondary_ratio,
        }
    }
}

/// Build the Glicol code mixing the primary and secondary voice
pub fn composition(primary: VoiceParams, secondary: VoiceParams) -> String {
    format!(
        "~osc1: sin {:.3} >> mul {:.4}\n~osc2: sin {:.3} >> mul {:.4}\no: mix ~osc1 ~osc2\n",
        non_negative(primary.frequency_hz),
        non_negative(primary.amplitude),
        non_negative(secondary.frequency_hz),
        non_negative(secondary.amplitude),
    )
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_contains_both_voices() {
        let primary = VoiceParams {
            amplitude: 0.5,
            frequency_hz: 440.0,
        };
        let code = composition(primary, primary.secondary(&AudioParams::default()));

        assert!(code.contains("~osc1: sin 440.000 >> mul 0.5000"));
        assert!(code.contains("~osc2: sin 880.000 >> mul 0.0000"));
        assert!(code.ends_with("o: mix ~osc1 ~osc2\n"));
    }

    #[test]
    fn test_secondary_voice_scaling() {
        let params = AudioParams {
            secondary_ratio: 1.5,
            secondary_level: 0.5,
            ..AudioParams::default()
        };
        let primary = VoiceParams {
            amplitude: 2.0,
            frequency_hz: 200.0,
        };

        let secondary = primary.secondary(&params);
        assert_eq!(secondary.amplitude, 1.0);
        assert_eq!(secondary.frequency_hz, 300.0);
    }

    #[test]
    fn test_invalid_numbers_rendered_as_zero() {
        let broken = VoiceParams {
            amplitude: f64::NAN,
            frequency_hz: -5.0,
        };
        let code = composition(broken, VoiceParams::default());
        assert!(code.starts_with("~osc1: sin 0.000 >> mul 0.0000"));
    }
}
