//! Log output setup.
//!
//! The terminal is owned by the user interface while the game runs, so log records are only ever
//! written to a file chosen on the command line.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

/// Installs the global log subscriber writing to `path`.
///
/// Nothing is installed when no path is given, which turns every log statement into a no-op. The
/// verbosity follows `RUST_LOG` and defaults to `info`.
///
/// # Errors
///
/// This function returns an error if the log file cannot be created or if a global subscriber was
/// already installed.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|err| eyre!("failed to install the log subscriber: {err}"))
}
