//! Boundary between the control panel state and the sound engine.

/// An oscillator parameterised by amplitude and frequency.
///
/// Implemented by [`crate::audio::AudioSystem`]; the control layer only
/// ever sees this trait.
pub trait OscillatorControl {
    fn set_amplitude(&mut self, amplitude: f64);

    /// Frequency in Hz
    fn set_frequency(&mut self, frequency_hz: f64);

    fn start(&mut self);

    fn stop(&mut self);

    /// Whether the oscillator is currently emitting
    fn is_playing(&self) -> bool;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::OscillatorControl;

    /// Oscillator double remembering the last values it was given
    #[derive(Debug, Default)]
    pub struct FakeOscillator {
        pub amplitude: f64,
        pub frequency: f64,
        pub playing: bool,
    }

    impl OscillatorControl for FakeOscillator {
        fn set_amplitude(&mut self, amplitude: f64) {
            self.amplitude = amplitude;
        }

        fn set_frequency(&mut self, frequency_hz: f64) {
            self.frequency = frequency_hz;
        }

        fn start(&mut self) {
            self.playing = true;
        }

        fn stop(&mut self) {
            self.playing = false;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }
}
