//! Audio output: two Glicol sine oscillators mixed on the default device.

mod synthesis;
mod system;

// Re-export public types
pub use synthesis::{composition, VoiceParams};
pub use system::AudioSystem;
