//! TUI module for tapestry
//!
//! Edits parameters from the keyboard, ships them to the audio thread and
//! draws what comes back: engine status, the stereo output and its spectrum.

mod spectrum;
pub mod state;
mod taps;
mod transport;
mod waveform;

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use tapestry_dsp::timing::{division::DIVISIONS, groove::GROOVES};
use tapestry_dsp::{ControlMessage, Status, NUM_TAPS};

pub use state::{Snapshot, UiInit};

use spectrum::{render_spectrum, SpectrumAnalyzer};
use state::{nudge, step_index, step_tap, toggles_from_status};
use taps::render_taps;
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

/// Frames kept for the scope and the FFT
const VIS_BUFFER_SIZE: usize = 2048;
const STEP: f32 = 0.05;

const HELP: &str = " [←→] tap [↑↓] time [m]ute [s]tack [f]ilter [v/V] level [,/.] pan [k/K] cutoff [r/R] res [a] fb tap \
                    [[/]] groove [g/G] amount [b/B] fb [t/T] tone [x/X] mix [e] law [d/D] div [o] clock [p]ing-pong [c]lear [w]rite [q]uit";

/// UI application state
pub struct UiApp {
    init: UiInit,
    snapshot: Snapshot,
    status: Status,
    snapshot_tx: Producer<Snapshot>,
    control_tx: Producer<ControlMessage>,
    status_rx: Consumer<Status>,
    audio_rx: Consumer<(f32, f32)>,
    audio_buffer: Vec<(f32, f32)>,
    spectrum: SpectrumAnalyzer,
    selected: usize,
    /// Snapshot changed but the ring was full; retry next frame
    dirty: bool,
    message: Option<String>,
    should_quit: bool,
}

impl UiApp {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        init: UiInit,
        snapshot: Snapshot,
        status: Status,
        snapshot_tx: Producer<Snapshot>,
        control_tx: Producer<ControlMessage>,
        status_rx: Consumer<Status>,
        audio_rx: Consumer<(f32, f32)>,
    ) -> Self {
        let spectrum = SpectrumAnalyzer::new(VIS_BUFFER_SIZE, init.sample_rate);
        Self {
            init,
            snapshot,
            status,
            snapshot_tx,
            control_tx,
            status_rx,
            audio_rx,
            audio_buffer: vec![(0.0, 0.0); VIS_BUFFER_SIZE],
            spectrum,
            selected: 0,
            dirty: false,
            message: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_status();
            self.flush_snapshot();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(frame) = self.audio_rx.pop() {
            self.audio_buffer.push(frame);
            received = true;
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
        if received {
            self.spectrum.update(&self.audio_buffer);
        }
    }

    fn poll_status(&mut self) {
        // Keep only the latest status
        while let Ok(status) = self.status_rx.pop() {
            self.status = status;
        }
    }

    fn flush_snapshot(&mut self) {
        if self.dirty && self.snapshot_tx.push(self.snapshot).is_ok() {
            self.dirty = false;
        }
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            self.message = Some("control queue full, edit dropped".into());
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let tap = self.selected;
        let before = self.snapshot.params;
        let clock_before = self.snapshot.clock_patched;
        let params = &mut self.snapshot.params;

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Left => step_tap(&mut self.selected, -1),
            KeyCode::Right => step_tap(&mut self.selected, 1),

            KeyCode::Up => params.time = (params.time * 1.1).min(10.0),
            KeyCode::Down => params.time = (params.time / 1.1).max(0.001),
            KeyCode::Char('[') => step_index(&mut params.groove, -1, GROOVES.len()),
            KeyCode::Char(']') => step_index(&mut params.groove, 1, GROOVES.len()),
            KeyCode::Char('g') => nudge(&mut params.groove_amount, -STEP, 0.0, 1.0),
            KeyCode::Char('G') => nudge(&mut params.groove_amount, STEP, 0.0, 1.0),
            KeyCode::Char('b') => nudge(&mut params.feedback, -STEP, 0.0, 0.99),
            KeyCode::Char('B') => nudge(&mut params.feedback, STEP, 0.0, 0.99),
            KeyCode::Char('t') => nudge(&mut params.feedback_tone, -STEP, 0.0, 1.0),
            KeyCode::Char('T') => nudge(&mut params.feedback_tone, STEP, 0.0, 1.0),
            KeyCode::Char('x') => nudge(&mut params.mix, -STEP, 0.0, 1.0),
            KeyCode::Char('X') => nudge(&mut params.mix, STEP, 0.0, 1.0),
            KeyCode::Char('e') => params.equal_power_mix = !params.equal_power_mix,
            KeyCode::Char('d') => step_index(&mut params.clock_division, -1, DIVISIONS.len()),
            KeyCode::Char('D') => step_index(&mut params.clock_division, 1, DIVISIONS.len()),
            KeyCode::Char('a') => params.feedback_tap = tap,
            KeyCode::Char('o') => self.snapshot.clock_patched = !self.snapshot.clock_patched,

            KeyCode::Char('v') => nudge(&mut params.taps[tap].level, -STEP, 0.0, 1.0),
            KeyCode::Char('V') => nudge(&mut params.taps[tap].level, STEP, 0.0, 1.0),
            KeyCode::Char(',') => nudge(&mut params.taps[tap].pan, -STEP, 0.0, 1.0),
            KeyCode::Char('.') => nudge(&mut params.taps[tap].pan, STEP, 0.0, 1.0),
            KeyCode::Char('k') => nudge(&mut params.taps[tap].cutoff, -STEP, 0.0, 1.0),
            KeyCode::Char('K') => nudge(&mut params.taps[tap].cutoff, STEP, 0.0, 1.0),
            KeyCode::Char('r') => nudge(&mut params.taps[tap].resonance, -STEP, 0.0, 1.0),
            KeyCode::Char('R') => nudge(&mut params.taps[tap].resonance, STEP, 0.0, 1.0),

            KeyCode::Char('m') => self.send(ControlMessage::ToggleMute(tap)),
            KeyCode::Char('s') => self.send(ControlMessage::ToggleStack(tap)),
            KeyCode::Char('f') => self.send(ControlMessage::CycleFilter(tap)),
            KeyCode::Char('p') => self.send(ControlMessage::TogglePingPong),
            KeyCode::Char('c') => self.send(ControlMessage::ClearBuffers),

            KeyCode::Char('w') => {
                self.message = Some(match self.save_toggles() {
                    Ok(path) => format!("toggles saved to {}", path.display()),
                    Err(err) => format!("save failed: {:#}", err),
                });
            }
            _ => {}
        }

        if self.snapshot.params != before || self.snapshot.clock_patched != clock_before {
            self.dirty = true;
        }
    }

    fn save_toggles(&self) -> EyreResult<PathBuf> {
        let path = self
            .init
            .toggle_file
            .clone()
            .ok_or_else(|| eyre!("no toggle file configured"))?;
        let json = toggles_from_status(&self.status).to_json()?;
        std::fs::write(&path, json)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, taps beside scope/spectrum, help
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),               // Transport bar
                Constraint::Min(NUM_TAPS as u16 + 3), // Taps + visuals
                Constraint::Length(2),               // Help bar
            ])
            .split(area);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(64), Constraint::Min(20)])
            .split(rows[1]);

        let visuals = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(middle[1]);

        let mids: Vec<f32> = self
            .audio_buffer
            .iter()
            .map(|f| 0.5 * (f.0 + f.1))
            .collect();
        let stats = AudioStats::from_buffer(&mids);

        render_transport(frame, rows[0], &self.init, &self.snapshot, &self.status, &stats);
        render_taps(frame, middle[0], &self.snapshot.params, &self.status, self.selected);
        render_waveform(frame, visuals[0], &self.audio_buffer);
        render_spectrum(frame, visuals[1], self.spectrum.data());

        let footer = match &self.message {
            Some(message) => format!(" {}\n{}", message, HELP),
            None => format!(" clock {}\n{}", if self.snapshot.clock_patched { "patched" } else { "unpatched" }, HELP),
        };
        let help = Paragraph::new(footer).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}
