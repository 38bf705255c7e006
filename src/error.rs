//! Error types for engine configuration.

use thiserror::Error;

/// Reasons a [`SynthConfig`](crate::SynthConfig) cannot be used to build an
/// engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// `octave_min` is above `octave_max`.
    #[error("octave range [{min}, {max}] is empty")]
    EmptyOctaveRange { min: i32, max: i32 },

    /// Starting octave lies outside the playable range.
    #[error("octave {octave} outside playable range [{min}, {max}]")]
    OctaveOutOfRange { octave: i32, min: i32, max: i32 },

    /// Block capacity is zero or larger than the engine can preallocate.
    #[error("block capacity must be between 1 and {max} frames, got {value}")]
    BlockCapacity { value: usize, max: usize },

    /// The display handoff cannot hold a full block.
    #[error("handoff holds {handoff} frames but blocks may be {block} frames")]
    HandoffCapacity { handoff: usize, block: usize },

    #[error("delay depth must be at least one fill call")]
    ZeroDelayDepth,

    #[error("sample rate must be positive and finite, got {0}")]
    SampleRate(f64),

    #[error("release decay factor must be in (0, 1], got {0}")]
    ReleaseDecay(f64),

    #[error("volume must be finite, got {0}")]
    Volume(f64),

    #[error("delay feedback must be finite, got {0}")]
    DelayFeedback(f64),

    #[error("message queue capacity must be at least 1")]
    ZeroMessageCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octave_range_display() {
        let err = ConfigError::EmptyOctaveRange { min: 5, max: 2 };
        assert_eq!(err.to_string(), "octave range [5, 2] is empty");
    }

    #[test]
    fn block_capacity_display() {
        let err = ConfigError::BlockCapacity {
            value: 4096,
            max: 2048,
        };
        let msg = err.to_string();
        assert!(msg.contains("4096"), "got: {msg}");
        assert!(msg.contains("2048"), "got: {msg}");
    }

    #[test]
    fn errors_have_no_source() {
        use std::error::Error;
        assert!(ConfigError::ZeroDelayDepth.source().is_none());
    }
}
