// Purpose - output frames, device byte formats, and the audio → display handoff

pub mod converter;
pub mod frame;
pub mod handoff;

pub use frame::{FrameBuffer, SampleFrame};
pub use handoff::{BufferHandoff, HandoffReader, HandoffWriter};
