use crate::{
    config::SynthConfig,
    dsp::WaveType,
    synth::{
        keys::PianoKey,
        message::{MessageSender, SynthMessage},
        poly::RenderSettings,
    },
};

/*
Note Controller
===============

Lives on the input/UI thread and turns raw input into note transitions.

A key sounds when it is held on the keyboard OR the mouse is pressed over it:

    is_down(key) = keys_held[key] || (mouse_pressed && mouse_key == key)

Every input change re-evaluates ALL keys from that raw state and compares the
result with what the audio thread was last told. Only differences are sent:

    told Off, is_down  →  NoteOn   (audio side: sine/saw phase = 0, power = 1)
    told On,  !is_down →  NoteOff  (audio side: phase and power untouched)
    otherwise          →  nothing

`notes_on` only changes once a message has actually been queued. If the
channel is full, the mirror still holds the old state, so the next
re-evaluation sends the transition again.

Shifting the octave silences everything. Held keys are picked up again in
the new octave on the next input event.
*/

pub struct NoteController<S: MessageSender> {
    tx: S,
    keys_held: [bool; PianoKey::COUNT],
    mouse_pressed: bool,
    mouse_key: Option<PianoKey>,
    /// Note states the audio thread has been sent, indexed by absolute note.
    notes_on: Box<[bool]>,
    settings: RenderSettings,
    octave: i32,
    octave_min: i32,
    octave_max: i32,
    silence_pending: bool,
}

impl<S: MessageSender> NoteController<S> {
    pub fn new(config: &SynthConfig, tx: S) -> Self {
        Self {
            tx,
            keys_held: [false; PianoKey::COUNT],
            mouse_pressed: false,
            mouse_key: None,
            notes_on: vec![false; config.voice_count()].into_boxed_slice(),
            settings: RenderSettings::from_config(config),
            octave: config.octave.clamp(config.octave_min, config.octave_max),
            octave_min: config.octave_min,
            octave_max: config.octave_max,
            silence_pending: false,
        }
    }

    /// Keyboard key went down or up.
    pub fn set_key(&mut self, key: PianoKey, pressed: bool) {
        self.keys_held[key.offset()] = pressed;
        self.update_keys();
    }

    /// Piano key currently under the mouse pointer, if any.
    pub fn set_mouse_key(&mut self, key: Option<PianoKey>) {
        self.mouse_key = key;
        self.update_keys();
    }

    pub fn set_mouse_pressed(&mut self, pressed: bool) {
        self.mouse_pressed = pressed;
        self.update_keys();
    }

    /// Move the keyboard by `delta` octaves, clamped to the playable range.
    ///
    /// Always silences every voice, even when the octave is already at a
    /// bound.
    pub fn shift_octave(&mut self, delta: i32) -> i32 {
        self.octave = self
            .octave
            .saturating_add(delta)
            .clamp(self.octave_min, self.octave_max);
        self.notes_on.fill(false);
        self.silence_pending = true;
        self.flush_silence();
        tracing::debug!(octave = self.octave, "octave shifted");
        self.octave
    }

    /// Advance Sine → Saw → Square → Sine. Returns the active wave type.
    pub fn cycle_wave_type(&mut self) -> WaveType {
        let next = self.settings.wave_type.next();
        if self.send(SynthMessage::SetWaveType(next)) {
            self.settings.wave_type = next;
            tracing::debug!(wave = next.name(), "wave type changed");
        }
        self.settings.wave_type
    }

    /// Returns whether delay is now enabled.
    pub fn toggle_delay(&mut self) -> bool {
        let enabled = !self.settings.delay_enabled;
        if self.send(SynthMessage::SetDelay(enabled)) {
            self.settings.delay_enabled = enabled;
            tracing::debug!(enabled, "delay toggled");
        }
        self.settings.delay_enabled
    }

    /// Returns whether release mode is now enabled.
    pub fn toggle_release(&mut self) -> bool {
        let enabled = !self.settings.release_enabled;
        if self.send(SynthMessage::SetRelease(enabled)) {
            self.settings.release_enabled = enabled;
            tracing::debug!(enabled, "release toggled");
        }
        self.settings.release_enabled
    }

    /// Recompute every key from raw input and send the differences.
    pub fn update_keys(&mut self) {
        self.flush_silence();
        if self.silence_pending {
            // A note-on sent ahead of the pending silence would be cut off
            return;
        }

        let base = self.octave_base();
        for key in PianoKey::ALL {
            let is_down = self.keys_held[key.offset()]
                || (self.mouse_pressed && self.mouse_key == Some(key));
            self.note(base + key.offset(), is_down);
        }
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Absolute note index of the lowest key at the current octave.
    pub fn octave_base(&self) -> usize {
        ((self.octave - self.octave_min) * 12) as usize
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    /// Whether `key` is sounding at the current octave, as far as the audio
    /// thread has been told.
    pub fn is_key_on(&self, key: PianoKey) -> bool {
        self.is_note_on(self.octave_base() + key.offset())
    }

    pub fn is_note_on(&self, note: usize) -> bool {
        self.notes_on.get(note).copied().unwrap_or(false)
    }

    fn note(&mut self, note: usize, is_down: bool) {
        let Some(&current) = self.notes_on.get(note) else {
            tracing::warn!(note, "key maps outside the voice table, ignoring");
            return;
        };
        if current == is_down {
            return;
        }

        let msg = if is_down {
            SynthMessage::NoteOn { note }
        } else {
            SynthMessage::NoteOff { note }
        };
        if self.send(msg) {
            self.notes_on[note] = is_down;
        }
    }

    fn flush_silence(&mut self) {
        if self.silence_pending && self.send(SynthMessage::AllNotesOff) {
            self.silence_pending = false;
        }
    }

    fn send(&mut self, msg: SynthMessage) -> bool {
        match self.tx.push(msg) {
            Ok(()) => true,
            Err(msg) => {
                tracing::warn!(?msg, "synth message queue full, retrying on next input");
                false
            }
        }
    }
}
