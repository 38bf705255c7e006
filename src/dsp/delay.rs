use std::collections::VecDeque;

use crate::dsp::mix_sample;
use crate::io::frame::SampleFrame;

/// Default number of past fill calls kept in the delay line.
pub const DEFAULT_DELAY_DEPTH: usize = 50;
/// Default gain applied to the delayed block before it is mixed back in.
pub const DEFAULT_DELAY_FEEDBACK: f64 = 1.0 / 3.0;

/*
Block Delay
===========

A conventional delay line stores individual samples. This one stores whole
rendered blocks:

    fill:      k-50   k-49   ...   k-1     k
    queue:   [ B₀  ,  B₁  ,  ... , B₄₉ ]
                ↑                          ↑
             dequeued,                  current block
             blended at 1/3             (blended, then enqueued)

The delay time is therefore `depth` FILL CALLS, and its length in seconds
depends on how many frames the audio device asks for each time. The blend
happens before the current block is enqueued, so the stored copy already
contains the echo and repeats decay by 1/3 per round trip.

The queue never holds more than `depth` blocks. Once it is full, each call
dequeues exactly one and enqueues exactly one, and the dequeued allocation is
reused for the new copy whenever the block length has not changed.
*/

pub struct FrameDelay {
    queue: VecDeque<Box<[SampleFrame]>>,
    depth: usize,
    feedback: f64,
}

impl FrameDelay {
    /// # Panics
    /// If `depth` is zero.
    pub fn new(depth: usize, feedback: f64) -> Self {
        assert!(depth > 0, "delay depth must be at least one fill call");
        Self {
            queue: VecDeque::with_capacity(depth),
            depth,
            feedback,
        }
    }

    /// Blend the block recorded `depth` calls ago into `block`, then record
    /// `block`.
    pub fn apply(&mut self, block: &mut [SampleFrame]) {
        let mut recycled = None;
        if self.queue.len() >= self.depth {
            if let Some(old) = self.queue.pop_front() {
                // Blocks of different lengths only blend their common prefix
                for (frame, past) in block.iter_mut().zip(old.iter()) {
                    frame.left = mix_sample(frame.left, past.left as f64 * self.feedback);
                    frame.right = mix_sample(frame.right, past.right as f64 * self.feedback);
                }
                recycled = Some(old);
            }
        }

        let entry = match recycled {
            Some(mut old) if old.len() == block.len() => {
                old.copy_from_slice(block);
                old
            }
            _ => Box::from(&*block),
        };
        self.queue.push_back(entry);
    }

    /// Number of blocks currently recorded.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for FrameDelay {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_DEPTH, DEFAULT_DELAY_FEEDBACK)
    }
}
