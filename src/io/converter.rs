use crate::io::frame::SampleFrame;

/// Write frames as interleaved native-endian i16 pairs, the layout audio
/// devices expect for 16-bit stereo.
///
/// Returns the number of bytes written. Bytes past the last whole frame are
/// zeroed.
pub fn frames_to_bytes(frames: &[SampleFrame], out: &mut [u8]) -> usize {
    let mut written = 0;
    for (frame, chunk) in frames.iter().zip(out.chunks_exact_mut(SampleFrame::BYTES)) {
        chunk[..2].copy_from_slice(&frame.left.to_ne_bytes());
        chunk[2..].copy_from_slice(&frame.right.to_ne_bytes());
        written += SampleFrame::BYTES;
    }
    out[written..].fill(0);
    written
}

/// Convert a 16-bit sample to the `[-1.0, 1.0)` float range.
#[inline]
pub fn sample_to_f32(sample: i16) -> f32 {
    sample as f32 / 32_768.0
}
