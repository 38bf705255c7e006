//! Double-buffered block handoff from the audio thread to the display.

/*
Front / Back Buffers
====================

The audio thread renders into the BACK buffer, which only it can touch. When
a block is complete the two buffers trade places:

    audio thread                       display thread
    ------------                       --------------
    copy block → back
    lock(front)
      swap(front, back)   ← O(1), exchanges two owned handles
    unlock
                                       lock(front)
                                         read / copy frames
                                       unlock

The reader only ever sees a buffer that was filled by one complete write, so
a frame count from one block can never be paired with samples from another.

The writer holds the lock for a pointer swap and nothing else. A reader that
holds it for a long time (e.g. drawing straight out of the front buffer)
delays the next swap, so readers should copy out via `read()` when the work
is heavier than a quick scan.
*/

use std::sync::Arc;

use parking_lot::Mutex;

use crate::io::frame::{FrameBuffer, SampleFrame};

/// Constructor for a connected writer/reader pair.
pub struct BufferHandoff;

impl BufferHandoff {
    /// Create a handoff whose buffers each hold `capacity` frames.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(capacity: usize) -> (HandoffWriter, HandoffReader) {
        let front = Arc::new(Mutex::new(FrameBuffer::with_capacity(capacity)));
        let writer = HandoffWriter {
            back: FrameBuffer::with_capacity(capacity),
            front: Arc::clone(&front),
        };
        (writer, HandoffReader { front })
    }
}

/// Audio-side half. Owns the back buffer.
pub struct HandoffWriter {
    back: FrameBuffer,
    front: Arc<Mutex<FrameBuffer>>,
}

impl HandoffWriter {
    pub fn capacity(&self) -> usize {
        self.back.capacity()
    }

    /// Publish a completed block.
    ///
    /// # Panics
    /// If `frames` is longer than the handoff capacity.
    pub fn write(&mut self, frames: &[SampleFrame]) {
        assert!(
            frames.len() <= self.back.capacity(),
            "handoff write of {} frames exceeds capacity {}",
            frames.len(),
            self.back.capacity()
        );
        self.back.copy_from(frames);
        std::mem::swap(&mut *self.front.lock(), &mut self.back);
    }
}

/// Display-side half. Cheap to clone; every clone sees the same front buffer.
#[derive(Clone)]
pub struct HandoffReader {
    front: Arc<Mutex<FrameBuffer>>,
}

impl HandoffReader {
    /// Copy the latest completed block into `out`, returning the number of
    /// frames copied.
    ///
    /// An `out` smaller than the block receives only its leading frames.
    pub fn read(&self, out: &mut FrameBuffer) -> usize {
        let front = self.front.lock();
        let len = front.len().min(out.capacity());
        out.copy_from(&front.frames()[..len]);
        len
    }

    /// Run `f` against the latest completed block without copying it.
    pub fn with_current<R>(&self, f: impl FnOnce(&[SampleFrame]) -> R) -> R {
        let front = self.front.lock();
        f(front.frames())
    }

    /// Owned copy of the latest completed block.
    pub fn snapshot(&self) -> Vec<SampleFrame> {
        self.with_current(|frames| frames.to_vec())
    }

    pub fn capacity(&self) -> usize {
        self.front.lock().capacity()
    }
}
