//! Top-level configuration: defaults, optionally overridden by a TOML file.
//!
//! Every section is `#[serde(default)]`, so a file like
//!
//! ```toml
//! [control]
//! tick_interval_ms = 50
//!
//! [audio]
//! secondary_level = 0.3
//! ```
//!
//! only changes the keys it names.

use serde::Deserialize;
use std::path::Path;

use crate::error::SynthError;
use crate::params::{AudioParams, ControlParams, WindowConfig};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub control: ControlParams,
    pub audio: AudioParams,
    pub window: WindowConfig,
}

impl SynthConfig {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, SynthError> {
        let text = std::fs::read_to_string(path).map_err(|source| SynthError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, SynthError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        self.control.validate().map_err(SynthError::InvalidConfig)?;
        self.audio.validate().map_err(SynthError::InvalidConfig)?;
        if self.window.width == 0 || self.window.height == 0 {
            return Err(SynthError::InvalidConfig(
                "window size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = SynthConfig::from_toml("").unwrap();
        assert_eq!(config.control.tick_interval_ms, 100);
        assert_eq!(config.audio.output_limit, 0.5);
    }

    #[test]
    fn test_partial_override() {
        let config = SynthConfig::from_toml(
            r#"
            [control]
            tick_interval_ms = 50
            frequency_range = { min = 20.0, max = 2000.0 }

            [audio]
            secondary_level = 0.3
            "#,
        )
        .unwrap();

        assert_eq!(config.control.tick_interval_ms, 50);
        assert_eq!(config.control.frequency_range.max, 2000.0);
        assert_eq!(config.control.initial_amplitude, 0.5);
        assert_eq!(config.audio.secondary_level, 0.3);
        assert_eq!(config.audio.secondary_ratio, 2.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = SynthConfig::from_toml("[control]\ntick_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, SynthError::InvalidConfig(_)));

        let err = SynthConfig::from_toml("[control]\ntick_interval_ms = \"fast\"\n").unwrap_err();
        assert!(matches!(err, SynthError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\ntitle = \"Test Synth\"").unwrap();

        let config = SynthConfig::load(file.path()).unwrap();
        assert_eq!(config.window.title, "Test Synth");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = SynthConfig::load(Path::new("/nonexistent/slidersynth.toml")).unwrap_err();
        assert!(matches!(err, SynthError::ConfigRead { .. }));
    }
}
