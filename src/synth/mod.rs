// Purpose: Voice table, note control, and the polyphonic render loop
// The controller runs on the UI thread; PolySynth runs on the audio thread.
// They only talk through SynthMessage.

pub mod controller;
pub mod keys;
pub mod message;
pub mod poly;
pub mod tuning;
pub mod voice;

pub use controller::NoteController;
pub use keys::PianoKey;
pub use message::SynthMessage;
pub use poly::{PolySynth, RenderSettings};

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

#[cfg(feature = "rtrb")]
use crate::{
    config::SynthConfig,
    error::ConfigError,
    io::handoff::{BufferHandoff, HandoffReader},
};

/// Everything needed to run the synth, already wired together.
#[cfg(feature = "rtrb")]
pub struct SynthParts {
    /// Move into the audio callback.
    pub engine: PolySynth<Consumer<SynthMessage>>,
    /// Keep on the input/UI thread.
    pub controller: NoteController<Producer<SynthMessage>>,
    /// Latest rendered block, for drawing.
    pub display: HandoffReader,
}

/// Build an engine, its note controller and a display reader connected by a
/// lock-free message ring and a double-buffered handoff.
#[cfg(feature = "rtrb")]
pub fn build(config: &SynthConfig) -> Result<SynthParts, ConfigError> {
    config.validate()?;

    let (tx, rx) = RingBuffer::<SynthMessage>::new(config.message_capacity);
    let (writer, display) = BufferHandoff::new(config.block_capacity);
    let engine = PolySynth::new(config, rx, writer)?;
    let controller = NoteController::new(config, tx);

    tracing::info!(
        voices = config.voice_count(),
        sample_rate = config.sample_rate,
        block_capacity = config.block_capacity,
        "synth built"
    );

    Ok(SynthParts {
        engine,
        controller,
        display,
    })
}
