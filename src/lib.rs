//! SliderSynth library - two mixed oscillators with slider gesture recording

pub mod audio;
pub mod cli;
pub mod config;
pub mod control;
pub mod error;
pub mod oscillator;
pub mod params;
pub mod rendering;
pub mod ui;
