//! TUI module for piano
//!
//! Draws the latest rendered block and forwards keyboard input to the note
//! controller.

mod status;
mod waveform;

use std::{io::stdout, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Producer;

use saavy_piano::{
    io::{frame::FrameBuffer, handoff::HandoffReader},
    synth::{NoteController, PianoKey, SynthMessage},
    SynthConfig,
};

use crate::keymap::{self, Action};
use status::render_status;
use waveform::render_waveform;

pub struct UiApp {
    controller: NoteController<Producer<SynthMessage>>,
    display: HandoffReader,
    /// Copy of the last rendered block, redrawn every frame
    scope: FrameBuffer,
    /// Terminal cannot report key releases; note keys toggle instead
    latch: bool,
    latched: [bool; PianoKey::COUNT],
    octave_min: i32,
    octave_max: i32,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        controller: NoteController<Producer<SynthMessage>>,
        display: HandoffReader,
        config: &SynthConfig,
    ) -> Self {
        let scope = FrameBuffer::with_capacity(display.capacity());
        Self {
            controller,
            display,
            scope,
            latch: false,
            latched: [false; PianoKey::COUNT],
            octave_min: config.octave_min,
            octave_max: config.octave_max,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            tracing::warn!("terminal does not report key releases, note keys will latch");
        }
        self.latch = !enhanced;

        let result = self.event_loop(terminal);

        if enhanced {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.display.read(&mut self.scope);

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let Some(action) = keymap::action_for(key.code) else {
            return;
        };

        match (action, key.kind) {
            (Action::Note(note), KeyEventKind::Press) if self.latch => {
                let held = &mut self.latched[note.offset()];
                *held = !*held;
                let pressed = *held;
                self.controller.set_key(note, pressed);
            }
            (Action::Note(note), KeyEventKind::Press) => self.controller.set_key(note, true),
            (Action::Note(note), KeyEventKind::Release) => self.controller.set_key(note, false),
            (_, KeyEventKind::Press) => self.run_command(action),
            _ => {}
        }
    }

    fn run_command(&mut self, action: Action) {
        match action {
            Action::CycleWave => {
                self.controller.cycle_wave_type();
            }
            Action::ToggleDelay => {
                self.controller.toggle_delay();
            }
            Action::ToggleRelease => {
                self.controller.toggle_release();
            }
            Action::OctaveDown => self.shift_octave(-1),
            Action::OctaveUp => self.shift_octave(1),
            Action::Quit => self.should_quit = true,
            Action::Note(_) => {}
        }
    }

    fn shift_octave(&mut self, delta: i32) {
        self.controller.shift_octave(delta);
        // Latched keys were silenced with everything else; let go of them
        // too or the next key press brings them back
        for key in PianoKey::ALL {
            if std::mem::take(&mut self.latched[key.offset()]) {
                self.controller.set_key(key, false);
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Oscilloscope
                Constraint::Length(4), // Status and keys
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let settings = self.controller.settings();
        render_waveform(frame, chunks[0], self.scope.frames(), settings.wave_type);
        render_status(
            frame,
            chunks[1],
            &self.controller,
            (self.octave_min, self.octave_max),
        );

        let help = if self.latch {
            " [Esc] Quit  [C] Wave  [V] Delay  [B] Release  [Z/X] Octave  (keys latch)"
        } else {
            " [Esc] Quit  [C] Wave  [V] Delay  [B] Release  [Z/X] Octave"
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use saavy_piano::synth::{self, SynthParts};

    fn press(ui: &mut UiApp, c: char) {
        ui.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    fn latching_ui() -> (UiApp, synth::PolySynth<rtrb::Consumer<SynthMessage>>) {
        let config = SynthConfig::default();
        let SynthParts {
            engine,
            controller,
            display,
        } = synth::build(&config).unwrap();
        let mut ui = UiApp::new(controller, display, &config);
        ui.latch = true;
        (ui, engine)
    }

    #[test]
    fn latched_key_toggles_on_second_press() {
        let (mut ui, _engine) = latching_ui();
        press(&mut ui, 'a');
        assert!(ui.controller.is_key_on(PianoKey::C1));
        press(&mut ui, 'a');
        assert!(!ui.controller.is_key_on(PianoKey::C1));
    }

    #[test]
    fn octave_shift_drops_latched_keys() {
        let (mut ui, mut engine) = latching_ui();
        press(&mut ui, 'a');
        press(&mut ui, 'x');
        press(&mut ui, 'd');

        assert!(!ui.controller.is_key_on(PianoKey::C1));
        assert!(ui.controller.is_key_on(PianoKey::E1));

        engine.render(16);
        let base = ui.controller.octave_base();
        assert_eq!(engine.voices().active_count(), 1);
        assert!(engine.voices().get(base + 4).is_some_and(|v| v.is_on()));

        // One press is enough to start C1 again
        press(&mut ui, 'a');
        assert!(ui.controller.is_key_on(PianoKey::C1));
    }
}
