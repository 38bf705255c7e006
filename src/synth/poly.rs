use crate::{
    config::SynthConfig,
    dsp::{mix_sample, FrameDelay, ReleaseEnvelope, WaveType},
    error::ConfigError,
    io::{
        converter,
        frame::{FrameBuffer, SampleFrame},
        handoff::HandoffWriter,
    },
    synth::{
        message::{MessageReceiver, SynthMessage},
        tuning::NoteFrequencyTable,
        voice::VoiceTable,
    },
};

/// Settings read by the render loop, changed only through [`SynthMessage`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub wave_type: WaveType,
    pub delay_enabled: bool,
    pub release_enabled: bool,
}

impl RenderSettings {
    pub fn from_config(config: &SynthConfig) -> Self {
        Self {
            wave_type: config.wave_type,
            delay_enabled: config.delay_enabled,
            release_enabled: config.release_enabled,
        }
    }
}

/// The audio-thread side of the synth.
///
/// Owns the voice table outright: note and setting changes arrive through
/// `rx` and are applied at the start of each fill, so the render loop never
/// shares mutable state with the UI thread.
pub struct PolySynth<R: MessageReceiver> {
    voices: VoiceTable,
    tuning: NoteFrequencyTable,
    settings: RenderSettings,
    delay: FrameDelay,
    release: ReleaseEnvelope,
    volume: f64,
    sample_rate: f64,
    rx: R,
    render_buf: FrameBuffer,
    handoff: HandoffWriter,
    fill_count: u64,
}

impl<R: MessageReceiver> PolySynth<R> {
    pub fn new(config: &SynthConfig, rx: R, handoff: HandoffWriter) -> Result<Self, ConfigError> {
        config.validate()?;
        if handoff.capacity() < config.block_capacity {
            return Err(ConfigError::HandoffCapacity {
                handoff: handoff.capacity(),
                block: config.block_capacity,
            });
        }

        let voice_count = config.voice_count();

        Ok(Self {
            voices: VoiceTable::new(voice_count),
            tuning: NoteFrequencyTable::new(config.octave_min, voice_count),
            settings: RenderSettings::from_config(config),
            delay: FrameDelay::new(config.delay_depth, config.delay_feedback),
            release: ReleaseEnvelope::new(config.release_decay),
            volume: config.volume,
            sample_rate: config.sample_rate,
            rx,
            render_buf: FrameBuffer::with_capacity(config.block_capacity),
            handoff,
            fill_count: 0,
        })
    }

    /// Render `frame_count` frames and publish them to the display handoff.
    ///
    /// # Panics
    /// If `frame_count` exceeds the block capacity. That is a broken caller
    /// contract, not a recoverable condition.
    pub fn render(&mut self, frame_count: usize) -> &[SampleFrame] {
        assert!(
            frame_count <= self.render_buf.capacity(),
            "requested {frame_count} frames, exceeds block capacity {}",
            self.render_buf.capacity()
        );

        // Process control messages
        self.process_messages();

        // Mix voices
        self.render_buf.set_len(frame_count);
        let wave = self.settings.wave_type;
        let frequencies = self.tuning.as_slice();
        for frame in self.render_buf.frames_mut() {
            let mut left = 0i16;
            for (voice, &frequency) in self.voices.iter_mut().zip(frequencies) {
                if !voice.is_on() {
                    continue;
                }
                let w = voice
                    .phase_mut()
                    .next_sample(wave, frequency, self.sample_rate);
                left = mix_sample(left, self.volume * voice.power() * w);
            }
            *frame = SampleFrame::mono(left);
        }

        // One release step per fill, not per sample
        if self.settings.release_enabled {
            self.voices.decay(&self.release);
        }

        if self.settings.delay_enabled {
            self.delay.apply(self.render_buf.frames_mut());
        }

        self.handoff.write(self.render_buf.frames());
        self.fill_count += 1;

        self.render_buf.frames()
    }

    /// Fill `out` completely.
    ///
    /// # Panics
    /// If `out` is longer than the block capacity.
    pub fn fill(&mut self, out: &mut [SampleFrame]) {
        let frames = self.render(out.len());
        out.copy_from_slice(frames);
    }

    /// Fill a raw device stream of interleaved native-endian i16 pairs.
    ///
    /// Renders `stream.len() / 4` frames; any trailing partial frame is
    /// zeroed.
    ///
    /// # Panics
    /// If the stream holds more bytes than a full block.
    pub fn fill_bytes(&mut self, stream: &mut [u8]) {
        let max_bytes = self.render_buf.capacity() * SampleFrame::BYTES;
        assert!(
            stream.len() <= max_bytes,
            "stream of {} bytes exceeds block capacity of {max_bytes} bytes",
            stream.len()
        );
        self.render(stream.len() / SampleFrame::BYTES);
        converter::frames_to_bytes(self.render_buf.frames(), stream);
    }

    /// Drain every pending control message.
    pub fn process_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            self.handle_message(msg);
        }
    }

    /// Apply a single control message immediately.
    pub fn handle_message(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note } => {
                self.voices.note_on(note);
            }
            SynthMessage::NoteOff { note } => {
                self.voices.note_off(note);
            }
            SynthMessage::AllNotesOff => self.voices.silence(),
            SynthMessage::SetWaveType(wave_type) => self.settings.wave_type = wave_type,
            SynthMessage::SetDelay(enabled) => self.settings.delay_enabled = enabled,
            SynthMessage::SetRelease(enabled) => self.settings.release_enabled = enabled,
        }
    }

    pub fn voices(&self) -> &VoiceTable {
        &self.voices
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    pub fn delay(&self) -> &FrameDelay {
        &self.delay
    }

    pub fn capacity(&self) -> usize {
        self.render_buf.capacity()
    }

    /// Completed fill calls since construction.
    pub fn fill_count(&self) -> u64 {
        self.fill_count
    }
}

#[cfg(all(test, feature = "rtrb"))]
mod tests {
    use super::*;
    use crate::{
        io::handoff::BufferHandoff,
        synth::{build, keys::PianoKey, SynthParts},
        MAX_BLOCK_SIZE,
    };

    fn parts(config: SynthConfig) -> SynthParts {
        build(&config).expect("valid config")
    }

    #[test]
    fn render_length_matches_request() {
        let SynthParts { mut engine, .. } = parts(SynthConfig::default());
        for n in [0, 1, 64, 441, MAX_BLOCK_SIZE] {
            assert_eq!(engine.render(n).len(), n);
        }
        assert_eq!(engine.fill_count(), 5);
    }

    #[test]
    #[should_panic(expected = "exceeds block capacity")]
    fn render_above_capacity_is_fatal() {
        let SynthParts { mut engine, .. } = parts(SynthConfig::default());
        engine.render(MAX_BLOCK_SIZE + 1);
    }

    #[test]
    fn silent_without_voices() {
        let SynthParts { mut engine, .. } = parts(SynthConfig::default());
        assert!(engine.render(256).iter().all(|f| *f == SampleFrame::SILENCE));
    }

    #[test]
    fn single_square_voice_only_hits_full_amplitude() {
        let SynthParts {
            mut engine,
            mut controller,
            ..
        } = parts(SynthConfig::default().wave_type(WaveType::Square));
        controller.set_key(PianoKey::A1, true);

        let block = engine.render(1024).to_vec();
        assert!(block.iter().all(|f| f.left == 1800 || f.left == -1800));
        assert!(block.iter().all(|f| f.right == f.left));
        assert!(block.iter().any(|f| f.left > 0));
        assert!(block.iter().any(|f| f.left < 0));
    }

    #[test]
    fn release_decays_once_per_fill() {
        let SynthParts {
            mut engine,
            mut controller,
            ..
        } = parts(SynthConfig::default().release(true));
        controller.set_key(PianoKey::C1, true);
        let note = controller.octave_base() + PianoKey::C1.offset();

        let mut last = 1.0;
        for m in 1..=40 {
            engine.render(128);
            let power = engine.voices().get(note).unwrap().power();
            assert!((power - 0.965f64.powi(m)).abs() < 1e-12, "fill {m}: {power}");
            assert!(power <= last);
            last = power;
        }
    }

    #[test]
    fn power_holds_without_release_mode() {
        let SynthParts {
            mut engine,
            mut controller,
            ..
        } = parts(SynthConfig::default());
        controller.set_key(PianoKey::E1, true);
        for _ in 0..10 {
            engine.render(64);
        }
        let note = controller.octave_base() + PianoKey::E1.offset();
        assert_eq!(engine.voices().get(note).unwrap().power(), 1.0);
    }

    #[test]
    fn released_voice_stops_decaying() {
        let SynthParts {
            mut engine,
            mut controller,
            ..
        } = parts(SynthConfig::default().release(true));
        let note = controller.octave_base() + PianoKey::G1.offset();

        controller.set_key(PianoKey::G1, true);
        engine.render(64);
        controller.set_key(PianoKey::G1, false);
        engine.render(64);
        engine.render(64);

        let voice = engine.voices().get(note).unwrap();
        assert!(!voice.is_on());
        assert_eq!(voice.power(), 0.965);
    }

    #[test]
    fn delay_echoes_one_third_after_depth_fills() {
        let config = SynthConfig::default()
            .wave_type(WaveType::Square)
            .delay(true);
        let depth = config.delay_depth;
        let SynthParts {
            mut engine,
            mut controller,
            ..
        } = parts(config);

        controller.set_key(PianoKey::D1, true);
        let original = engine.render(256).to_vec();
        controller.set_key(PianoKey::D1, false);

        for _ in 1..depth {
            assert!(engine.render(256).iter().all(|f| *f == SampleFrame::SILENCE));
        }

        let echo = engine.render(256).to_vec();
        for (e, o) in echo.iter().zip(&original) {
            assert_eq!(e.left, o.left / 3);
            assert_eq!(e.right, o.right / 3);
        }
        assert_eq!(engine.delay().len(), depth);
    }

    #[test]
    fn disabling_delay_freezes_the_queue() {
        let SynthParts {
            mut engine,
            mut controller,
            ..
        } = parts(SynthConfig::default().delay(true));
        for _ in 0..5 {
            engine.render(32);
        }
        assert_eq!(engine.delay().len(), 5);

        assert!(!controller.toggle_delay());
        for _ in 0..5 {
            engine.render(32);
        }
        assert_eq!(engine.delay().len(), 5, "disabled delay neither grows nor drains");

        assert!(controller.toggle_delay());
        engine.render(32);
        assert_eq!(engine.delay().len(), 6);
    }

    #[test]
    fn every_render_is_published() {
        let SynthParts {
            mut engine,
            mut controller,
            display,
        } = parts(SynthConfig::default().wave_type(WaveType::Saw));
        controller.set_key(PianoKey::B1, true);

        let first = engine.render(100).to_vec();
        assert_eq!(display.snapshot(), first);

        let second = engine.render(37).to_vec();
        assert_eq!(display.snapshot(), second);
    }

    #[test]
    fn fill_bytes_renders_whole_frames() {
        let SynthParts {
            mut engine,
            mut controller,
            display,
        } = parts(SynthConfig::default().wave_type(WaveType::Square));
        controller.set_key(PianoKey::C2, true);

        let mut stream = vec![0xFFu8; 4 * 16 + 2];
        engine.fill_bytes(&mut stream);

        let frames = display.snapshot();
        assert_eq!(frames.len(), 16);
        assert_eq!(i16::from_ne_bytes([stream[0], stream[1]]), frames[0].left);
        assert_eq!(&stream[64..], &[0, 0]);
    }

    #[test]
    #[should_panic(expected = "exceeds block capacity")]
    fn fill_bytes_rejects_oversized_stream() {
        let SynthParts { mut engine, .. } = parts(SynthConfig::default().block_capacity(8));
        engine.fill_bytes(&mut [0u8; 8 * 4 + 4]);
    }

    #[test]
    fn fill_writes_every_frame() {
        let SynthParts {
            mut engine,
            mut controller,
            ..
        } = parts(SynthConfig::default().wave_type(WaveType::Square));
        controller.set_key(PianoKey::F1, true);
        let mut out = [SampleFrame::SILENCE; 32];
        engine.fill(&mut out);
        assert!(out.iter().all(|f| f.left.abs() == 1800));
    }

    #[test]
    fn handoff_smaller_than_block_is_rejected() {
        let (_tx, rx) = rtrb::RingBuffer::<SynthMessage>::new(4);
        let (writer, _reader) = BufferHandoff::new(16);
        let err = PolySynth::new(&SynthConfig::default(), rx, writer).err();
        assert_eq!(
            err,
            Some(ConfigError::HandoffCapacity {
                handoff: 16,
                block: MAX_BLOCK_SIZE
            })
        );
    }

    #[test]
    fn wave_change_keeps_other_phases() {
        let SynthParts {
            mut engine,
            mut controller,
            ..
        } = parts(SynthConfig::default());
        let note = controller.octave_base() + PianoKey::A1.offset();
        controller.set_key(PianoKey::A1, true);
        engine.render(64);
        let sine_phase = engine.voices().get(note).unwrap().phase().sine;
        assert!(sine_phase > 0.0);

        controller.cycle_wave_type();
        engine.render(64);
        let phase = *engine.voices().get(note).unwrap().phase();
        assert_eq!(phase.sine, sine_phase);
        assert!(phase.saw > 0.0);
    }
}
