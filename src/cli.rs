//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::config::SynthConfig;
use crate::error::SynthError;
use crate::params::CaptureConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "slidersynth")]
#[command(about = "Two-oscillator synth with slider gesture recording", long_about = None)]
pub struct Args {
    /// TOML file overriding the default parameters
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the synthesized output to a WAV file
    #[arg(long, value_name = "FILE")]
    pub capture: Option<PathBuf>,

    /// Start with the demo recording loaded
    #[arg(long)]
    pub load_demo: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> log::Level {
        match self.verbose {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }

    /// Defaults, or the config file if one was given
    pub fn load_config(&self) -> Result<SynthConfig, SynthError> {
        match &self.config {
            Some(path) => SynthConfig::load(path),
            None => Ok(SynthConfig::default()),
        }
    }

    /// Capture configuration if `--capture` was given
    pub fn capture_config(&self) -> Option<CaptureConfig> {
        self.capture.clone().map(CaptureConfig::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["slidersynth"]);
        assert!(args.config.is_none());
        assert!(args.capture_config().is_none());
        assert!(!args.load_demo);
        assert_eq!(args.log_level(), log::Level::Info);
        assert_eq!(args.load_config().unwrap().control.tick_interval_ms, 100);
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "slidersynth",
            "-vv",
            "--load-demo",
            "--capture",
            "take.wav",
        ]);
        assert_eq!(args.log_level(), log::Level::Trace);
        assert!(args.load_demo);
        assert_eq!(
            args.capture_config().unwrap().path,
            PathBuf::from("take.wav")
        );
    }
}
