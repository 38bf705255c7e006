/// One stereo frame of 16-bit output. The mix path is mono, so `right`
/// always mirrors `left`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleFrame {
    pub left: i16,
    pub right: i16,
}

impl SampleFrame {
    pub const SILENCE: SampleFrame = SampleFrame { left: 0, right: 0 };

    /// Size of one frame on the wire (two interleaved i16 samples).
    pub const BYTES: usize = std::mem::size_of::<SampleFrame>();

    /// Duplicate a mono sample to both channels.
    #[inline]
    pub fn mono(sample: i16) -> Self {
        Self {
            left: sample,
            right: sample,
        }
    }
}

/// Fixed-capacity block of frames, allocated once and reused in place.
///
/// Only the first `len()` frames are valid; the rest is scratch space left
/// over from earlier, longer blocks.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    frames: Box<[SampleFrame]>,
    len: usize,
}

impl FrameBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: vec![SampleFrame::SILENCE; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid frames.
    pub fn frames(&self) -> &[SampleFrame] {
        &self.frames[..self.len]
    }

    pub fn frames_mut(&mut self) -> &mut [SampleFrame] {
        &mut self.frames[..self.len]
    }

    /// Change the valid length without touching sample memory.
    ///
    /// # Panics
    /// If `len` exceeds the capacity.
    pub fn set_len(&mut self, len: usize) {
        assert!(
            len <= self.capacity(),
            "frame count {len} exceeds buffer capacity {}",
            self.capacity()
        );
        self.len = len;
    }

    /// Replace the contents with `src`.
    ///
    /// # Panics
    /// If `src` is longer than the capacity.
    pub fn copy_from(&mut self, src: &[SampleFrame]) {
        self.set_len(src.len());
        self.frames[..src.len()].copy_from_slice(src);
    }
}
