//! Low-level DSP primitives used by the polyphonic engine.
//!
//! These components are allocation-free on the steady-state render path,
//! making them safe to call from the audio callback. They stay focused on the
//! signal math so the engine can layer voice management and control messages
//! on top.

/// Frame-granular feedback delay.
pub mod delay;
/// Buffer-granular release decay.
pub mod envelope;
/// Phase-accumulating sine, saw and square waveforms.
pub mod oscillator;

pub use delay::FrameDelay;
pub use envelope::ReleaseEnvelope;
pub use oscillator::{OscillatorPhase, WaveType};

/// Add `value` to a 16-bit accumulator.
///
/// The sum truncates toward zero and wraps on overflow instead of clipping,
/// so too many loud voices fold over rather than saturate.
#[inline]
pub fn mix_sample(acc: i16, value: f64) -> i16 {
    (acc as f64 + value) as i64 as i16
}
