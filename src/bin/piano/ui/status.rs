//! Status panel - effect toggles, octave, and the key strip

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_piano::synth::{message::MessageSender, NoteController, PianoKey};

use super::waveform::wave_color;
use crate::keymap;

fn toggle_span(label: &str, on: bool) -> Span<'static> {
    let (text, color) = if on { ("on", Color::Green) } else { ("off", Color::Red) };
    Span::styled(format!(" {label}: {text}  "), Style::default().fg(color))
}

pub fn render_status<S: MessageSender>(
    frame: &mut Frame,
    area: Rect,
    controller: &NoteController<S>,
    (octave_min, octave_max): (i32, i32),
) {
    let block = Block::default().title(" saavy piano ").borders(Borders::ALL);
    let settings = controller.settings();

    let status = Line::from(vec![
        Span::styled(
            format!(" Wave: {}  ", settings.wave_type.name()),
            Style::default().fg(wave_color(settings.wave_type)),
        ),
        toggle_span("Delay", settings.delay_enabled),
        toggle_span("Release", settings.release_enabled),
        Span::styled(
            format!(" Octave: {} [{octave_min}-{octave_max}]", controller.octave()),
            Style::default().fg(Color::Cyan),
        ),
    ]);

    let keys: Vec<Span> = PianoKey::ALL
        .iter()
        .map(|&key| {
            let style = match (controller.is_key_on(key), key.is_white()) {
                (true, _) => Style::default()
                    .fg(Color::Black)
                    .bg(wave_color(settings.wave_type))
                    .add_modifier(Modifier::BOLD),
                (false, true) => Style::default().fg(Color::Black).bg(Color::White),
                (false, false) => Style::default().fg(Color::White).bg(Color::DarkGray),
            };
            Span::styled(format!("{:^3}", keymap::label(key)), style)
        })
        .collect();

    let mut key_line = vec![Span::raw(" ")];
    key_line.extend(keys);

    frame.render_widget(
        Paragraph::new(vec![status, Line::from(key_line)]).block(block),
        area,
    );
}
