use crate::dsp::{OscillatorPhase, ReleaseEnvelope};

/// Oscillator and envelope state for one note slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Voice {
    is_on: bool,
    power: f64,
    phase: OscillatorPhase,
}

impl Voice {
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Envelope amplitude in `[0, 1]`.
    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn phase(&self) -> &OscillatorPhase {
        &self.phase
    }

    pub(crate) fn phase_mut(&mut self) -> &mut OscillatorPhase {
        &mut self.phase
    }

    /// Start sounding at full power.
    ///
    /// Sine and saw restart from zero; the square phase carries on from
    /// wherever the previous note left it.
    pub fn press(&mut self) {
        self.phase.sine = 0.0;
        self.phase.saw = 0.0;
        self.power = 1.0;
        self.is_on = true;
    }

    /// Stop sounding. Phase and power are kept as they are.
    pub fn release(&mut self) {
        self.is_on = false;
    }
}

/// Fixed-size voice storage indexed by absolute note number.
///
/// Lookups outside the table are ignored rather than propagated: a malformed
/// note index cannot corrupt any other voice.
#[derive(Debug, Clone)]
pub struct VoiceTable {
    voices: Box<[Voice]>,
}

impl VoiceTable {
    pub fn new(len: usize) -> Self {
        Self {
            voices: vec![Voice::default(); len].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn get(&self, note: usize) -> Option<&Voice> {
        self.voices.get(note)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voice> {
        self.voices.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Voice> {
        self.voices.iter_mut()
    }

    /// Press `note` if it is silent. Returns whether anything changed, so a
    /// repeated note-on never restarts a sounding voice.
    pub fn note_on(&mut self, note: usize) -> bool {
        match self.voices.get_mut(note) {
            Some(voice) if !voice.is_on => {
                voice.press();
                true
            }
            _ => false,
        }
    }

    /// Release `note` if it is sounding.
    pub fn note_off(&mut self, note: usize) -> bool {
        match self.voices.get_mut(note) {
            Some(voice) if voice.is_on => {
                voice.release();
                true
            }
            _ => false,
        }
    }

    /// Release every voice.
    pub fn silence(&mut self) {
        for voice in self.voices.iter_mut() {
            voice.release();
        }
    }

    /// Apply one release step to every sounding voice.
    pub fn decay(&mut self, envelope: &ReleaseEnvelope) {
        for voice in self.voices.iter_mut().filter(|v| v.is_on) {
            envelope.step(&mut voice.power);
        }
    }

    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_on).count()
    }
}
