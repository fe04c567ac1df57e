//! Tapestry - application builder and audio runner

use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use tapestry_dsp::{
    ControlMessage, EngineConfig, InputFrame, MultiTapDelay, Params, Status, ToggleState,
    MAX_BLOCK_SIZE,
};

use super::source::PulseSource;
use super::ui::{Snapshot, UiApp, UiInit};

/// Ring capacities. Parameter snapshots and status only need the latest
/// value; audio is sized for a few UI frames of scope data.
const SNAPSHOT_RING: usize = 32;
const CONTROL_RING: usize = 64;
const STATUS_RING: usize = 8;
const AUDIO_RING: usize = 8192;

/// Main application builder
pub struct Tapestry {
    pulse_interval: f32,
    toggle_file: Option<PathBuf>,
}

impl Tapestry {
    pub fn new() -> Self {
        Self {
            pulse_interval: 0.5,
            toggle_file: None,
        }
    }

    /// Distance between source blips (and clock pulses), in seconds.
    pub fn pulse_interval(mut self, seconds: f32) -> Self {
        self.pulse_interval = seconds.max(0.01);
        self
    }

    /// Where toggles are loaded from at start and saved to with `w`.
    pub fn toggle_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.toggle_file = Some(path.into());
        self
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let device_name = device.name().unwrap_or_else(|_| "unknown device".into());

        println!("=== tapestry ===");
        println!("Device: {}", device_name);
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);

        let mut engine = MultiTapDelay::new(EngineConfig {
            sample_rate,
            ..EngineConfig::default()
        });
        if let Some(state) = self.load_toggles()? {
            engine.restore_toggles(&state);
            println!("Restored toggles");
        }

        let initial = Snapshot {
            params: Params {
                time: 1.0,
                groove_amount: 0.5,
                feedback: 0.45,
                mix: 0.6,
                ..Params::default()
            },
            clock_patched: true,
        };
        let initial_status = {
            engine.process(&initial.params, &InputFrame::default());
            engine.status()
        };

        let (mut snapshot_tx, mut snapshot_rx) = RingBuffer::<Snapshot>::new(SNAPSHOT_RING);
        let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_RING);
        let (mut status_tx, status_rx) = RingBuffer::<Status>::new(STATUS_RING);
        let (mut audio_tx, audio_rx) = RingBuffer::<(f32, f32)>::new(AUDIO_RING);
        snapshot_tx
            .push(initial)
            .map_err(|_| eyre!("snapshot ring rejected the initial parameters"))?;

        let mut source = PulseSource::new(sample_rate, self.pulse_interval);
        let mut snapshot = initial;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                // Only the newest snapshot matters
                while let Ok(latest) = snapshot_rx.pop() {
                    snapshot = latest;
                }
                engine.drain_controls(&mut control_rx);

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);

                    for i in 0..frames_to_render {
                        let pulse = source.next_frame();
                        let mut input = InputFrame::mono(pulse.audio);
                        if snapshot.clock_patched {
                            input.clock = Some(pulse.clock);
                        }
                        let out = engine.process(&snapshot.params, &input);

                        let offset = (frames_written + i) * channels;
                        for ch in 0..channels {
                            data[offset + ch] = if ch % 2 == 0 { out.left } else { out.right };
                        }
                        // Scope data is best-effort
                        let _ = audio_tx.push((out.left, out.right));
                    }

                    frames_written += frames_to_render;
                }

                let _ = status_tx.push(engine.status());
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;

        stream.play()?;

        let init = UiInit {
            device_name,
            sample_rate,
            channels,
            pulse_interval: source_interval(self.pulse_interval, sample_rate),
            toggle_file: self.toggle_file.clone(),
        };
        let mut ui = UiApp::new(
            init,
            initial,
            initial_status,
            snapshot_tx,
            control_tx,
            status_rx,
            audio_rx,
        );

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        drop(stream);
        result
    }

    fn load_toggles(&self) -> EyreResult<Option<ToggleState>> {
        let Some(path) = &self.toggle_file else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let state = ToggleState::from_json(&json)
            .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(state))
    }
}

impl Default for Tapestry {
    fn default() -> Self {
        Self::new()
    }
}

fn source_interval(seconds: f32, sample_rate: f32) -> f32 {
    PulseSource::new(sample_rate, seconds).interval_seconds()
}
