//! Stereo output scope

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

fn to_points(samples: impl Iterator<Item = f32>, len: usize) -> Vec<(f64, f64)> {
    samples
        .enumerate()
        .map(|(i, sample)| (i as f64 / len.max(1) as f64, sample as f64))
        .collect()
}

/// Render left (cyan) and right (magenta) on the same axes
pub fn render_waveform(frame: &mut Frame, area: Rect, frames: &[(f32, f32)]) {
    let block = Block::default().title(" Output L/R ").borders(Borders::ALL);

    let left = to_points(frames.iter().map(|f| f.0), frames.len());
    let right = to_points(frames.iter().map(|f| f.1), frames.len());
    let peak = frames
        .iter()
        .fold(0.0f32, |acc, f| acc.max(f.0.abs()).max(f.1.abs()))
        .max(0.25) as f64;

    let datasets = vec![
        Dataset::default()
            .name("L")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&left),
        Dataset::default()
            .name("R")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&right),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-peak, peak])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
