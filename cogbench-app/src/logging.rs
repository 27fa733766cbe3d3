//! Tracing subscriber setup.
//!
//! Logs always go to stderr so the task display on stdout stays clean.
//! `COGBENCH_LOG` takes precedence over the configured level.

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "COGBENCH_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Human,
    /// Newline-delimited JSON
    Json,
}

/// Maps `-v` occurrences to a filter directive; 0 leaves the configured level alone.
pub const fn verbosity_to_directive(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Installs the global subscriber. Safe to call more than once.
pub fn init_logging(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let debug = level.starts_with("debug") || level.starts_with("trace");

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(debug)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_target(debug)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
