#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

use crate::dsp::WaveType;

/// Control changes sent from the input/UI thread to the audio thread.
///
/// `note` is an absolute voice index (key offset plus octave base).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    NoteOn { note: usize },
    NoteOff { note: usize },
    AllNotesOff,
    SetWaveType(WaveType),
    SetDelay(bool),
    SetRelease(bool),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

/// Sending half of the control channel.
///
/// A full channel hands the message back so the caller can retry later.
pub trait MessageSender {
    fn push(&mut self, msg: SynthMessage) -> Result<(), SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

#[cfg(feature = "rtrb")]
impl MessageSender for Producer<SynthMessage> {
    fn push(&mut self, msg: SynthMessage) -> Result<(), SynthMessage> {
        Producer::push(self, msg).map_err(|err| match err {
            rtrb::PushError::Full(msg) => msg,
        })
    }
}
