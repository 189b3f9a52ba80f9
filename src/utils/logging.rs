//! tracing subscriber setup.
//!
//! The terminal host cannot write to stderr while the alternate screen is up,
//! so it logs to ~/.flappy-shrimp/flappy.log. The simulator logs to stderr.
//! Filtering comes from `FLAPPY_LOG` (same syntax as `RUST_LOG`).

use super::persistence::{save_path, LOG_FILE};
use crate::core::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "FLAPPY_LOG";
pub const DEFAULT_FILTER: &str = "flappy_shrimp=info";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Append to ~/.flappy-shrimp/flappy.log.
pub fn init_file_logging() -> Result<()> {
    init_file_logging_at(&save_path(LOG_FILE)?)
}

pub fn init_file_logging_at(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    // A second init in the same process keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter(DEFAULT_FILTER))
        .try_init();
    Ok(())
}

/// Log to stderr. `quiet` raises the default level to warnings only.
pub fn init_stderr_logging(quiet: bool) {
    let default = if quiet { "warn" } else { DEFAULT_FILTER };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(default))
        .try_init();
}
