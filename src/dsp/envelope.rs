/// Default per-fill multiplier applied to held voices in release mode.
pub const DEFAULT_RELEASE_DECAY: f64 = 0.965;

/// Stepped exponential decay applied once per fill call.
///
/// The step size is a whole block, not a sample, so the envelope is coarse
/// and its speed depends on the block length the audio device asks for.
/// After `m` fills a voice that started at full power sits at `factor^m`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseEnvelope {
    factor: f64,
}

impl ReleaseEnvelope {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }

    /// Advance `power` by one fill.
    #[inline]
    pub fn step(&self, power: &mut f64) {
        *power *= self.factor;
    }
}

impl Default for ReleaseEnvelope {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_DECAY)
    }
}
