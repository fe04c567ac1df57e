//! Tap grid widget - one row per tap

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use tapestry_dsp::dsp::FilterMode;
use tapestry_dsp::{Params, Status, NUM_TAPS};

const BAR_WIDTH: usize = 10;

fn level_bar(level: f32) -> String {
    let filled = (level.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

fn pan_label(pan: f32) -> String {
    match pan {
        p if (p - 0.5).abs() < 0.01 => "C".to_string(),
        p if p < 0.5 => format!("L{:.0}", (0.5 - p) * 200.0),
        p => format!("R{:.0}", (p - 0.5) * 200.0),
    }
}

fn filter_color(mode: FilterMode) -> Color {
    match mode {
        FilterMode::Off => Color::DarkGray,
        FilterMode::LowPass => Color::Blue,
        FilterMode::HighPass => Color::Yellow,
        FilterMode::BandPass => Color::Green,
        FilterMode::Notch => Color::Red,
    }
}

/// Render the tap grid
pub fn render_taps(frame: &mut Frame, area: Rect, params: &Params, status: &Status, selected: usize) {
    let header = Row::new(["#", "delay", "level", "pan", "filter", "cutoff", "res", "flags"])
        .style(Style::default().fg(Color::DarkGray));

    let rows = (0..NUM_TAPS).map(|tap| {
        let tap_params = &params.taps[tap];
        let muted = status.is_muted(tap);
        let stacked = status.is_stacked(tap);
        let mode = status.filter_modes[tap];

        let mut flags = String::new();
        if muted {
            flags.push('M');
        }
        if stacked {
            flags.push('S');
        }
        if tap == params.feedback_tap {
            flags.push_str(" FB");
        }

        let mut style = if muted {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        if tap == selected {
            style = style.add_modifier(Modifier::REVERSED);
        }

        Row::new(vec![
            Cell::from(format!("{:>2}", tap + 1)),
            Cell::from(format!("{:>7.1} ms", status.tap_delays[tap] * 1000.0)),
            Cell::from(level_bar(tap_params.level)),
            Cell::from(pan_label(tap_params.pan)),
            Cell::from(Span::styled(mode.name(), Style::default().fg(filter_color(mode)))),
            Cell::from(format!("{:.2}", tap_params.cutoff)),
            Cell::from(format!("{:.2}", tap_params.resonance)),
            Cell::from(flags),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(11),
            Constraint::Length(BAR_WIDTH as u16 + 1),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Min(6),
        ],
    )
    .header(header)
    .block(Block::default().title(" Taps ").borders(Borders::ALL));

    frame.render_widget(table, area);
}
