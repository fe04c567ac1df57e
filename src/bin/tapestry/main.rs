//! tapestry - terminal front end for the multi-tap groove delay
//!
//! Run with: cargo run --bin tapestry

mod app;
mod source;
mod ui;

use app::Tapestry;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    Tapestry::new()
        .pulse_interval(0.5)
        .toggle_file("tapestry_toggles.json")
        .run()
}
