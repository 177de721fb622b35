//! Logging initialization for mdash.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `MDASH_LOG` environment variable, falling back to the configured
//! `tui.log_level`. The TUI owns the terminal, so while it runs logs go to a
//! file (or nowhere); other subcommands log to stderr.
//!
//! ```bash
//! # Debug level, written to the configured log file
//! MDASH_LOG=debug mdash
//!
//! # Module-specific filtering
//! MDASH_LOG=movable_dashboard::layout=trace,warn mdash dump
//! ```

use crate::config::schema::LogLevel;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "MDASH_LOG";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// Appended to a file.
    File(PathBuf),
    /// Dropped.
    Discard,
}

impl LogTarget {
    /// Target for the TUI: the configured file, or nothing when unset.
    pub fn for_tui(log_file: &str) -> Self {
        let trimmed = log_file.trim();
        if trimmed.is_empty() {
            LogTarget::Discard
        } else {
            LogTarget::File(crate::config::xdg::expand_tilde(trimmed))
        }
    }
}

/// Builds the filter from `MDASH_LOG`, falling back to `fallback` when the
/// variable is unset or invalid.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the global tracing subscriber.
///
/// A second call is a no-op. Fails only when the log file cannot be opened.
pub fn init(fallback: LogLevel, target: LogTarget) -> std::io::Result<()> {
    let filter = filter(fallback);
    let builder = fmt().with_env_filter(filter).with_target(false);
    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Discard => builder.with_writer(std::io::sink).try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
