//! Spectrum analyzer widget
//!
//! Hann-windowed FFT of the mid signal, folded into log-spaced bands. Each
//! band falls back slowly so echoes leave a visible trail.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Number of log-spaced bands to display
const BANDS: usize = 48;
const LOWEST_HZ: f32 = 20.0;
const FLOOR_DB: f64 = -100.0;
/// dB a band may fall per update
const FALLBACK_DB: f64 = 1.5;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin range `[start, end)` folded into each band
    band_bins: Vec<(usize, usize)>,
    /// (centre frequency in Hz, level in dB)
    bands: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(fft_len);
        let window = (0..fft_len)
            .map(|i| {
                let t = i as f32 / (fft_len - 1) as f32;
                0.5 - 0.5 * (std::f32::consts::TAU * t).cos()
            })
            .collect();

        let nyquist = (sample_rate / 2.0).min(20_000.0).max(LOWEST_HZ * 2.0);
        let bin_hz = sample_rate / fft_len as f32;
        let last_bin = fft_len / 2;
        let mut band_bins = Vec::with_capacity(BANDS);
        let mut bands = Vec::with_capacity(BANDS);
        for band in 0..BANDS {
            let edge = |b: usize| LOWEST_HZ * (nyquist / LOWEST_HZ).powf(b as f32 / BANDS as f32);
            let (low, high) = (edge(band), edge(band + 1));
            let start = ((low / bin_hz) as usize).min(last_bin - 1);
            let end = ((high / bin_hz).ceil() as usize).clamp(start + 1, last_bin);
            band_bins.push((start, end));
            bands.push(((low * high).sqrt() as f64, FLOOR_DB));
        }

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            band_bins,
            bands,
        }
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Analyse the newest `len()` frames (mid of left and right).
    pub fn update(&mut self, frames: &[(f32, f32)]) {
        if frames.len() < self.len() {
            return;
        }
        let recent = &frames[frames.len() - self.len()..];
        for ((bin, frame), w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *bin = Complex::new(0.5 * (frame.0 + frame.1) * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for ((start, end), band) in self.band_bins.iter().zip(self.bands.iter_mut()) {
            let power = self.scratch[*start..*end]
                .iter()
                .map(|c| c.norm_sqr())
                .fold(0.0f32, f32::max)
                .max(1e-12);
            let db = 10.0 * (power as f64).log10();
            band.1 = db.max(band.1 - FALLBACK_DB).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.bands
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    // Plot against log frequency so the bands are evenly spread
    let points: Vec<(f64, f64)> = spectrum.iter().map(|&(f, db)| (f.log10(), db)).collect();
    let low = points.first().map_or(1.0, |p| p.0);
    let high = points.last().map_or(4.3, |p| p.0).max(low + 0.1);
    let top = points.iter().map(|p| p.1).fold(FLOOR_DB, f64::max).max(0.0) + 10.0;

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([low, high])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, top])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
