//! piano - terminal keyboard synthesizer
//!
//! Run with: cargo run --bin piano
//!
//! Set `SAAVY_PIANO_LOG=<path>` to write trace output to a file; the terminal
//! itself belongs to the UI. `RUST_LOG` filters as usual.

mod app;
mod keymap;
mod ui;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::Piano;

const LOG_ENV: &str = "SAAVY_PIANO_LOG";

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    Piano::new().octave(4).run()
}

fn init_logging() -> EyreResult<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = std::fs::File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.to_string_lossy()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
