//! File-backed logging setup.
//!
//! The TUI owns the terminal, so log lines go to a file instead of stderr:
//! `MINIM_LOG_PATH` when set, otherwise `$XDG_STATE_HOME/minim/minim.log`
//! (falling back to `~/.local/state/minim/minim.log`). `RUST_LOG` overrides
//! the configured filter.

use std::path::PathBuf;
use std::sync::Arc;
use std::{env, fs};

use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

fn log_path_from(state_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    let state_dir = state_home.or_else(|| home.map(|h| h.join(".local").join("state")))?;
    Some(state_dir.join("minim").join("minim.log"))
}

/// Resolve the log file path from `MINIM_LOG_PATH` or XDG state defaults.
pub fn resolve_log_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MINIM_LOG_PATH") {
        return Some(PathBuf::from(p));
    }
    log_path_from(
        env::var_os("XDG_STATE_HOME").map(PathBuf::from),
        env::var_os("HOME").map(PathBuf::from),
    )
}

/// Initialize the global tracing subscriber writing to the log file.
///
/// When no log path can be resolved this is a no-op; the player still runs.
pub fn init(settings: &LogSettings) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = resolve_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.level.clone())),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
