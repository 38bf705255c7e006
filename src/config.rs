//! Engine configuration.
//!
//! # Example
//!
//! ```
//! use saavy_piano::{dsp::WaveType, SynthConfig};
//!
//! let config = SynthConfig::new()
//!     .sample_rate(48_000.0)
//!     .wave_type(WaveType::Square)
//!     .release(true);
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{
        delay::{DEFAULT_DELAY_DEPTH, DEFAULT_DELAY_FEEDBACK},
        envelope::DEFAULT_RELEASE_DECAY,
        WaveType,
    },
    error::ConfigError,
    synth::keys::PianoKey,
    MAX_BLOCK_SIZE, SAMPLE_RATE,
};

/// Amplitude of one voice at full power, in 16-bit sample units.
pub const DEFAULT_VOLUME: f64 = 1800.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: f64,
    /// Largest block a single fill call may request.
    pub block_capacity: usize,
    pub volume: f64,
    pub release_decay: f64,
    /// Delay length in fill calls.
    pub delay_depth: usize,
    pub delay_feedback: f64,
    pub octave_min: i32,
    pub octave_max: i32,
    /// Starting octave.
    pub octave: i32,
    pub wave_type: WaveType,
    pub delay_enabled: bool,
    pub release_enabled: bool,
    /// Slots in the UI → audio message ring.
    pub message_capacity: usize,
}

impl SynthConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            block_capacity: MAX_BLOCK_SIZE,
            volume: DEFAULT_VOLUME,
            release_decay: DEFAULT_RELEASE_DECAY,
            delay_depth: DEFAULT_DELAY_DEPTH,
            delay_feedback: DEFAULT_DELAY_FEEDBACK,
            octave_min: 1,
            octave_max: 6,
            octave: 4,
            wave_type: WaveType::Sine,
            delay_enabled: false,
            release_enabled: false,
            message_capacity: 256,
        }
    }

    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn block_capacity(mut self, frames: usize) -> Self {
        self.block_capacity = frames;
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn release_decay(mut self, factor: f64) -> Self {
        self.release_decay = factor;
        self
    }

    pub fn delay_depth(mut self, fills: usize) -> Self {
        self.delay_depth = fills;
        self
    }

    pub fn delay_feedback(mut self, gain: f64) -> Self {
        self.delay_feedback = gain;
        self
    }

    /// Set the playable octave range and keep the starting octave inside it.
    pub fn octave_range(mut self, min: i32, max: i32) -> Self {
        self.octave_min = min;
        self.octave_max = max;
        if min <= max {
            self.octave = self.octave.clamp(min, max);
        }
        self
    }

    pub fn octave(mut self, octave: i32) -> Self {
        self.octave = octave;
        self
    }

    pub fn wave_type(mut self, wave_type: WaveType) -> Self {
        self.wave_type = wave_type;
        self
    }

    pub fn delay(mut self, enabled: bool) -> Self {
        self.delay_enabled = enabled;
        self
    }

    pub fn release(mut self, enabled: bool) -> Self {
        self.release_enabled = enabled;
        self
    }

    pub fn message_capacity(mut self, slots: usize) -> Self {
        self.message_capacity = slots;
        self
    }

    /// Number of voices: every octave base the keyboard can reach, plus the
    /// keys that spill into the octave above.
    pub fn voice_count(&self) -> usize {
        let span = (self.octave_max - self.octave_min).max(0) as usize;
        span * 12 + PianoKey::COUNT
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.octave_min > self.octave_max {
            return Err(ConfigError::EmptyOctaveRange {
                min: self.octave_min,
                max: self.octave_max,
            });
        }
        if !(self.octave_min..=self.octave_max).contains(&self.octave) {
            return Err(ConfigError::OctaveOutOfRange {
                octave: self.octave,
                min: self.octave_min,
                max: self.octave_max,
            });
        }
        if self.block_capacity == 0 || self.block_capacity > MAX_BLOCK_SIZE {
            return Err(ConfigError::BlockCapacity {
                value: self.block_capacity,
                max: MAX_BLOCK_SIZE,
            });
        }
        if self.delay_depth == 0 {
            return Err(ConfigError::ZeroDelayDepth);
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        if !(self.release_decay > 0.0 && self.release_decay <= 1.0) {
            return Err(ConfigError::ReleaseDecay(self.release_decay));
        }
        if !self.volume.is_finite() {
            return Err(ConfigError::Volume(self.volume));
        }
        if !self.delay_feedback.is_finite() {
            return Err(ConfigError::DelayFeedback(self.delay_feedback));
        }
        if self.message_capacity == 0 {
            return Err(ConfigError::ZeroMessageCapacity);
        }
        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::new()
    }
}
