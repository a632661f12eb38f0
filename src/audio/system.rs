//! Audio system running the Glicol engine on the default output device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glicol::Engine;
use std::fs::File;
use std::io::BufWriter;
use std::sync::{Arc, Mutex};

use super::synthesis::{composition, VoiceParams};
use crate::error::SynthError;
use crate::oscillator::OscillatorControl;
use crate::params::{audio_constants::BLOCK_SIZE, AudioParams, CaptureConfig};

type WavCapture = Arc<Mutex<hound::WavWriter<BufWriter<File>>>>;

/// Engine state shared with the audio callback
struct EngineState {
    engine: Engine<BLOCK_SIZE>,
    /// Whether the oscillators are audible; silence is written otherwise
    running: bool,
    /// Last rendered block, consumed frame by frame across callbacks
    block: [[f32; 2]; BLOCK_SIZE],
    block_pos: usize,
}

impl EngineState {
    fn next_frame(&mut self) -> [f32; 2] {
        if self.block_pos >= BLOCK_SIZE {
            let (buffers, _) = self.engine.next_block(vec![]);
            for i in 0..BLOCK_SIZE {
                let left = buffers[0][i];
                let right = if buffers.len() > 1 { buffers[1][i] } else { left };
                self.block[i] = [left, right];
            }
            self.block_pos = 0;
        }
        let frame = self.block[self.block_pos];
        self.block_pos += 1;
        frame
    }
}

/// Two mixed sine oscillators on the default output device
pub struct AudioSystem {
    state: Arc<Mutex<EngineState>>,
    params: AudioParams,
    voice: VoiceParams,
    sample_rate: u32,
    channels: u16,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the output device and start the engine (initially silent)
    pub fn new(params: AudioParams, capture: Option<CaptureConfig>) -> Result<Self, SynthError> {
        params.validate().map_err(SynthError::InvalidConfig)?;

        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(SynthError::NoOutputDevice)?;
        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        println!(
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate,
            channels
        );

        // Create Glicol engine
        let voice = VoiceParams::default();
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate as usize);
        engine.update_with_code(&composition(voice, voice.secondary(&params)));
        engine
            .update()
            .map_err(|e| SynthError::Engine(format!("{:?}", e)))?;

        let state = Arc::new(Mutex::new(EngineState {
            engine,
            running: false,
            block: [[0.0; 2]; BLOCK_SIZE],
            block_pos: BLOCK_SIZE,
        }));
        let state_clone = Arc::clone(&state);

        // Create WAV writer if capturing
        let wav_writer: Option<WavCapture> = match capture {
            Some(capture) => {
                let writer =
                    hound::WavWriter::create(&capture.path, capture.wav_spec(channels, sample_rate))?;
                log::info!("Capturing output to {}", capture.path.display());
                Some(Arc::new(Mutex::new(writer)))
            }
            None => None,
        };

        let limit = params.output_limit;
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                match state_clone.lock() {
                    Ok(mut state) if state.running => {
                        write_frames(data, channels as usize, limit, || state.next_frame());
                    }
                    _ => data.fill(0.0),
                }

                if let Some(ref writer) = wav_writer {
                    if let Ok(mut w) = writer.lock() {
                        for &sample in data.iter() {
                            let _ = w.write_sample(sample);
                        }
                    }
                }
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        Ok(Self {
            state,
            params,
            voice,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Hand the current voice settings to the engine
    fn push_composition(&self) {
        let code = composition(self.voice, self.voice.secondary(&self.params));
        match self.state.lock() {
            Ok(mut state) => {
                state.engine.update_with_code(&code);
            }
            Err(_) => log::warn!("Audio engine lock poisoned, dropping parameter update"),
        }
    }

    fn set_running(&self, running: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.running = running;
        }
    }
}

impl OscillatorControl for AudioSystem {
    fn set_amplitude(&mut self, amplitude: f64) {
        if self.voice.amplitude != amplitude {
            self.voice.amplitude = amplitude;
            self.push_composition();
        }
    }

    fn set_frequency(&mut self, frequency_hz: f64) {
        if self.voice.frequency_hz != frequency_hz {
            self.voice.frequency_hz = frequency_hz;
            self.push_composition();
        }
    }

    fn start(&mut self) {
        self.set_running(true);
    }

    fn stop(&mut self) {
        self.set_running(false);
    }

    fn is_playing(&self) -> bool {
        self.state.lock().map(|state| state.running).unwrap_or(false)
    }
}

/// Fill an interleaved buffer from a stereo frame source.
///
/// Even channels get the left sample, odd channels the right one, and
/// every sample is hard clipped to `±limit`.
fn write_frames(
    data: &mut [f32],
    channels: usize,
    limit: f32,
    mut next_frame: impl FnMut() -> [f32; 2],
) {
    if channels == 0 {
        return;
    }
    for frame in data.chunks_mut(channels) {
        let [left, right] = next_frame();
        let left = left.clamp(-limit, limit);
        let right = right.clamp(-limit, limit);
        for (channel, sample) in frame.iter_mut().enumerate() {
            *sample = if channel % 2 == 0 { left } else { right };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_frames_interleaves_stereo() {
        let mut data = [0.0f32; 6];
        let mut n = 0.0;
        write_frames(&mut data, 2, 1.0, || {
            n += 0.1;
            [n, -n]
        });

        let expected = [0.1, -0.1, 0.2, -0.2, 0.3, -0.3];
        for (got, want) in data.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_write_frames_clips_to_limit() {
        let mut data = [0.0f32; 4];
        write_frames(&mut data, 2, 0.5, || [3.0, -3.0]);
        assert_eq!(data, [0.5, -0.5, 0.5, -0.5]);
    }

    #[test]
    fn test_write_frames_mono_and_surround() {
        let mut mono = [0.0f32; 3];
        let mut frames = 0;
        write_frames(&mut mono, 1, 1.0, || {
            frames += 1;
            [0.25, 0.75]
        });
        assert_eq!(mono, [0.25; 3]);
        assert_eq!(frames, 3);

        let mut quad = [0.0f32; 4];
        write_frames(&mut quad, 4, 1.0, || [0.25, 0.75]);
        assert_eq!(quad, [0.25, 0.75, 0.25, 0.75]);
    }
}
