//! Transport bar widget - shows timing, loop settings and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use tapestry_dsp::Status;

use super::{Snapshot, UiInit};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the transport bar
pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    init: &UiInit,
    snapshot: &Snapshot,
    status: &Status,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" tapestry ").borders(Borders::ALL);
    let params = &snapshot.params;

    let timing = if status.clocked {
        Span::styled(
            format!(" CLK {} = {:.0} ms  ", status.division_name, status.base_time * 1000.0),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled(
            format!(" FREE {:.0} ms  ", status.base_time * 1000.0),
            Style::default().fg(Color::Cyan),
        )
    };

    let timing_line = Line::from(vec![
        timing,
        Span::styled(
            format!("Groove: {} {:.0}%  ", status.groove_name, params.groove_amount * 100.0),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "FB: {:.0}% tap {}  Tone: {:.2}  ",
                params.feedback * 100.0,
                params.feedback_tap + 1,
                params.feedback_tone
            ),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            if status.ping_pong { "PING-PONG  " } else { "" },
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let stats_line = Line::from(vec![
        Span::styled(
            format!(
                " Mix: {:.0}% {}  ",
                params.mix * 100.0,
                if params.equal_power_mix { "(eq. power)" } else { "(linear)" }
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "{} | {:.1}kHz x{} | pulse {:.0} ms  ",
                init.device_name,
                init.sample_rate / 1000.0,
                init.channels,
                init.pulse_interval * 1000.0
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(vec![timing_line, stats_line]).block(block);
    frame.render_widget(paragraph, area);
}
