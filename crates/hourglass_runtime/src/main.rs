//! Hourglass Runtime
//!
//! Loads settings, installs logging and plays one run on the terminal.
//!
//! Usage: `hourglass [settings.json]`

mod console;

use anyhow::{Context, Result};
use console::TextRenderer;
use hourglass_services::{ReaderInput, Settings};
use hourglass_sim::{Outcome, Simulation};
use std::fs::File;
use std::sync::Mutex;
use tracing::Level;

fn load_settings() -> Result<Settings> {
    match std::env::args().nth(1) {
        Some(path) => {
            Settings::load(&path).with_context(|| format!("failed to load settings from {path}"))
        }
        None => Ok(Settings::default()),
    }
}

/// Logs go to the configured file, or stderr, so stdout stays the screen.
fn init_logging(settings: &Settings) -> Result<()> {
    match &settings.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {path}"))?;
            tracing_subscriber::fmt()
                .with_max_level(Level::DEBUG)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(Level::WARN)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let settings = load_settings()?;
    init_logging(&settings)?;

    tracing::info!("Hourglass v{}", hourglass_core::VERSION);
    tracing::info!(?settings, "starting run");

    let mut renderer = TextRenderer::new(std::io::stdout(), &settings);
    let mut sim = Simulation::new(settings).context("failed to build the dungeon")?;
    let mut input = ReaderInput::new(std::io::stdin().lock());

    let outcome = sim.run(&mut input, &mut renderer)?;

    sim.log_phase_timings();
    let summary = serde_json::to_string(&sim.summary())?;
    tracing::info!(%summary, "run summary");

    match outcome {
        Outcome::Won => println!("You escaped with the hourglass. You win!"),
        Outcome::Lost => println!("The sands run out. Game over."),
    }
    Ok(())
}
