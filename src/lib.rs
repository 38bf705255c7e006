//! Polyphonic keyboard synth core.
//!
//! Turns held keys into a 16-bit stereo stream. The stream can pass through
//! a stepped release envelope and a block-granular feedback delay, and every
//! rendered block is handed to a display thread through a double buffer.
//!
//! ```
//! use saavy_piano::{synth::{self, PianoKey}, SynthConfig};
//!
//! let mut parts = synth::build(&SynthConfig::default()).unwrap();
//! parts.controller.set_key(PianoKey::A1, true);
//!
//! let block = parts.engine.render(512).to_vec();
//! assert_eq!(parts.display.snapshot(), block);
//! ```

pub mod config;
pub mod dsp; // Oscillators, release envelope, block delay
pub mod error;
pub mod io; // Frames, device formats, display handoff
pub mod synth; // Voice management and polyphony

pub use config::SynthConfig;
pub use error::ConfigError;

/// Largest block a single fill call can render.
pub const MAX_BLOCK_SIZE: usize = 2048;
/// Default output sample rate in Hz.
pub const SAMPLE_RATE: f64 = 44_100.0;
