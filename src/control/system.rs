//! Control panel state: slider values, record/playback loop and sound toggle.

use std::time::{Duration, Instant};

use super::timer::RepeatingTimer;
use crate::oscillator::OscillatorControl;
use crate::params::{demo, ControlParams, Slider};

/// Recorded slider gesture, one value per timer tick.
///
/// The two sequences are independent: they may differ in length and each
/// has its own playback position.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub amplitudes: Vec<f64>,
    pub frequencies: Vec<f64>,
    amp_index: usize,
    freq_index: usize,
}

impl Recording {
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty() && self.frequencies.is_empty()
    }

    /// Length of the longer sequence
    pub fn len(&self) -> usize {
        self.amplitudes.len().max(self.frequencies.len())
    }

    pub fn push(&mut self, amplitude: f64, frequency: f64) {
        self.amplitudes.push(amplitude);
        self.frequencies.push(frequency);
    }

    pub fn clear(&mut self) {
        self.amplitudes.clear();
        self.frequencies.clear();
        self.rewind();
    }

    pub fn replace(&mut self, amplitudes: Vec<f64>, frequencies: Vec<f64>) {
        self.amplitudes = amplitudes;
        self.frequencies = frequencies;
        self.rewind();
    }

    pub fn rewind(&mut self) {
        self.amp_index = 0;
        self.freq_index = 0;
    }

    /// Playback positions as (amplitude index, frequency index)
    pub fn positions(&self) -> (usize, usize) {
        (self.amp_index, self.freq_index)
    }

    /// Next (amplitude, frequency) pair; `None` for an empty sequence
    pub fn next_values(&mut self) -> (Option<f64>, Option<f64>) {
        (
            next_cyclic(&self.amplitudes, &mut self.amp_index),
            next_cyclic(&self.frequencies, &mut self.freq_index),
        )
    }
}

/// Read `values[*index]` and advance the index, wrapping at the length
fn next_cyclic(values: &[f64], index: &mut usize) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    if *index >= values.len() {
        *index = 0;
    }
    let value = values[*index];
    *index = (*index + 1) % values.len();
    Some(value)
}

/// Observable synth state driving one oscillator
pub struct ControlSystem<O: OscillatorControl> {
    oscillator: O,
    params: ControlParams,

    amplitude: f64,
    frequency: f64,

    /// Whether the oscillator is emitting
    sound: bool,
    /// Whether slider positions are being recorded
    recording: bool,
    /// Whether recorded positions are being played back
    playing: bool,

    timer: RepeatingTimer,
    recorded: Recording,
}

impl<O: OscillatorControl> ControlSystem<O> {
    /// Create the control state and push the initial slider values to the oscillator
    pub fn new(oscillator: O, params: ControlParams) -> Self {
        let amplitude = params.amplitude_range.clamp(params.initial_amplitude);
        let frequency = params.frequency_range.clamp(params.initial_frequency);
        let timer = RepeatingTimer::new(Duration::from_millis(params.tick_interval_ms));

        let mut system = Self {
            sound: oscillator.is_playing(),
            oscillator,
            params,
            amplitude,
            frequency,
            recording: false,
            playing: false,
            timer,
            recorded: Recording::default(),
        };
        system.apply_to_oscillator();
        system
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn sound(&self) -> bool {
        self.sound
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn recorded(&self) -> &Recording {
        &self.recorded
    }

    pub fn params(&self) -> &ControlParams {
        &self.params
    }

    pub fn oscillator(&self) -> &O {
        &self.oscillator
    }

    /// When the timer wants the event loop to wake up next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = self.params.amplitude_range.clamp(amplitude);
        self.apply_to_oscillator();
    }

    pub fn set_frequency(&mut self, frequency_hz: f64) {
        self.frequency = self.params.frequency_range.clamp(frequency_hz);
        self.apply_to_oscillator();
    }

    pub fn slider_value(&self, slider: Slider) -> f64 {
        match slider {
            Slider::Amplitude => self.amplitude,
            Slider::Frequency => self.frequency,
        }
    }

    /// Slider position within its range (0.0..=1.0)
    pub fn slider_fraction(&self, slider: Slider) -> f64 {
        self.params.range(slider).to_fraction(self.slider_value(slider))
    }

    pub fn set_slider_fraction(&mut self, slider: Slider, fraction: f64) {
        let value = self.params.range(slider).from_fraction(fraction);
        match slider {
            Slider::Amplitude => self.set_amplitude(value),
            Slider::Frequency => self.set_frequency(value),
        }
    }

    /// Move a slider by whole nudge steps (negative moves down)
    pub fn nudge_slider(&mut self, slider: Slider, steps: i32) {
        let fraction = self.slider_fraction(slider) + f64::from(steps) * self.params.nudge_step;
        self.set_slider_fraction(slider, fraction);
    }

    /// Start or stop recording slider positions; always cancels playback
    pub fn toggle_recording(&mut self, now: Instant) {
        self.playing = false;
        self.recording = !self.recording;
        self.timer.stop();
        if self.recording {
            self.timer.start(now);
        }
        log::info!(
            "Recording {}",
            if self.recording { "started" } else { "stopped" }
        );
    }

    /// Start or stop replaying the recording; always cancels recording
    pub fn toggle_playback(&mut self, now: Instant) {
        self.recording = false;
        self.playing = !self.playing;
        self.timer.stop();
        if self.playing {
            self.timer.start(now);
        }
        log::info!(
            "Playback {}",
            if self.playing { "started" } else { "stopped" }
        );
    }

    /// Run the timer; returns true if a tick happened
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.tick();
        true
    }

    /// One timer step: record the sliders or move them from the recording
    pub fn tick(&mut self) {
        if self.recording {
            self.recorded.push(self.amplitude, self.frequency);
            log::trace!(
                "Recorded step {} (amp {:.2}, freq {:.1} Hz)",
                self.recorded.len(),
                self.amplitude,
                self.frequency
            );
        } else if self.playing {
            self.move_sliders();
        }
    }

    fn move_sliders(&mut self) {
        if self.recorded.is_empty() {
            log::debug!("Nothing recorded, stopping playback");
            self.playing = false;
            self.timer.stop();
            return;
        }

        let (amplitude, frequency) = self.recorded.next_values();
        if let Some(amplitude) = amplitude {
            self.amplitude = self.params.amplitude_range.clamp(amplitude);
        }
        if let Some(frequency) = frequency {
            self.frequency = self.params.frequency_range.clamp(frequency);
        }
        self.apply_to_oscillator();
    }

    /// Discard both recorded sequences
    pub fn delete_recording(&mut self) {
        self.recorded.clear();
        log::info!("Recording deleted");
    }

    /// Replace the recording with the bundled demo gesture
    pub fn load_demo(&mut self) {
        self.recorded
            .replace(demo::AMPLITUDES.to_vec(), demo::FREQUENCIES.to_vec());
        log::info!(
            "Loaded demo ({} amplitude, {} frequency steps)",
            demo::AMPLITUDES.len(),
            demo::FREQUENCIES.len()
        );
    }

    /// Mute or unmute the oscillator
    pub fn toggle_sound(&mut self) {
        if self.oscillator.is_playing() {
            self.oscillator.stop();
        } else {
            self.apply_to_oscillator();
            self.oscillator.start();
        }
        self.sound = self.oscillator.is_playing();
        log::info!("Sound {}", if self.sound { "on" } else { "off" });
    }

    fn apply_to_oscillator(&mut self) {
        self.oscillator.set_amplitude(self.amplitude);
        self.oscillator.set_frequency(self.frequency);
    }

    /// One-line summary of the panel, used as the window title
    pub fn status_line(&self) -> String {
        format!(
            "{} | Amplitude {:.2} | Frequency {:.1} Hz | {} | {} | {} steps",
            if self.sound { "Sound on" } else { "Sound off" },
            self.amplitude,
            self.frequency,
            if self.recording { "Recording" } else { "Record" },
            if self.playing { "Playing" } else { "Play" },
            self.recorded.len(),
        )
    }
}
