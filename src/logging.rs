//! Logging configuration for grandline.
//!
//! Writes to a file in TUI mode (to avoid corrupting the terminal display)
//! and to stderr in snapshot mode.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Initializes logging for TUI mode.
///
/// Logs are written to a file to avoid corrupting the terminal display.
/// Location: `~/.local/state/grandline/grandline.log` on Linux (XDG state
/// directory), or the platform-appropriate directory on other systems.
pub fn init_file_logging() {
    let log_path = get_log_path();

    // Ensure parent directory exists
    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            // Fall back to no logging rather than corrupting the TUI
            return;
        }
    }

    // Open log file (truncate on each run to avoid unbounded growth)
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false) // No ANSI colors in file output
        .init();
}

/// Initializes logging for snapshot mode.
///
/// Logs are written to stderr so stdout stays clean for the rendered output.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the path for the log file.
pub fn get_log_path() -> PathBuf {
    // Try state directory first (XDG_STATE_HOME on Linux)
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("grandline").join("grandline.log");
    }

    // Fall back to config directory
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("grandline").join("grandline.log");
    }

    // Last resort: temp directory
    std::env::temp_dir().join("grandline.log")
}
