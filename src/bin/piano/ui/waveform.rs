//! Oscilloscope of the most recent block

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use saavy_piano::{dsp::WaveType, io::converter::sample_to_f32, io::frame::SampleFrame};

/// A single voice peaks well below full scale; zoom the y axis to match.
const Y_RANGE: f64 = 0.25;

pub fn wave_color(wave: WaveType) -> Color {
    match wave {
        WaveType::Sine => Color::Rgb(255, 192, 0),
        WaveType::Saw => Color::Rgb(240, 100, 128),
        WaveType::Square => Color::Rgb(128, 160, 255),
    }
}

pub fn render_waveform(frame: &mut Frame, area: Rect, frames: &[SampleFrame], wave: WaveType) {
    let block = Block::default()
        .title(format!(" {} ", wave.name()))
        .borders(Borders::ALL);

    // Left channel only; both carry the same signal
    let len = frames.len().max(1) as f64;
    let data: Vec<(f64, f64)> = frames
        .iter()
        .enumerate()
        .map(|(i, f)| (i as f64 / len, f64::from(sample_to_f32(f.left))))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(wave_color(wave)))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-Y_RANGE, Y_RANGE])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
