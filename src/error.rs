//! Error type shared by the audio, config and rendering systems.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("No audio output device found")]
    NoOutputDevice,

    #[error("Failed to get audio config: {0}")]
    OutputConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Glicol engine init failed: {0}")]
    Engine(String),

    #[error("WAV capture error: {0}")]
    Capture(#[from] hound::Error),

    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Render setup failed: {0}")]
    Render(String),
}
