//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (Hz, milliseconds, linear gain)
//! - Documented ranges and meanings
//! - Serde defaults so a TOML file only needs the keys it overrides

mod audio;
mod control;
mod render;

// Re-export all types
pub use audio::{audio_constants, AudioParams};
pub use control::{demo, ControlParams, Slider, SliderRange};
pub use render::{CaptureConfig, WindowConfig};
