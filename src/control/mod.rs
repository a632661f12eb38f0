//! Panel state and the record/playback timer.
//!
//! Everything here runs on the UI thread; the oscillator is reached only
//! through [`crate::oscillator::OscillatorControl`].

mod system;
mod timer;

// Re-export public types
pub use system::{ControlSystem, Recording};
pub use timer::RepeatingTimer;
