//! Where finished sessions go.

use chrono::{DateTime, Utc};
use cogbench_core::{CompleteTestRequest, ParadigmKind, SessionSummary, TestStatistics};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write results to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write results to stdout")]
    Stdout(#[source] io::Error),

    #[error("failed to encode results")]
    Encode(#[from] serde_json::Error),
}

/// Everything known about one finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteReport {
    pub test_type: ParadigmKind,
    pub completed_at: DateTime<Utc>,
    pub seed: u64,
    pub summary: SessionSummary,
    pub request: CompleteTestRequest,
    pub statistics: TestStatistics,
}

impl CompleteReport {
    pub fn new(kind: ParadigmKind, seed: u64, summary: SessionSummary, elapsed: Duration) -> Self {
        Self {
            test_type: kind,
            completed_at: Utc::now(),
            seed,
            request: CompleteTestRequest::from_summary(&summary, elapsed),
            statistics: TestStatistics::from_summary(&summary),
            summary,
        }
    }
}

pub trait ResultSink {
    fn submit(&mut self, report: &CompleteReport) -> Result<(), SinkError>;
}

/// Appends one JSON document per line
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonFileSink {
    fn submit(&mut self, report: &CompleteReport) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(report)?;
        line.push('\n');
        let io_err = |source| SinkError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).map_err(io_err)?;
        info!(path = %self.path.display(), test_type = %report.test_type, "report written");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ResultSink for StdoutSink {
    fn submit(&mut self, report: &CompleteReport) -> Result<(), SinkError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, report)?;
        writeln!(out).map_err(SinkError::Stdout)
    }
}
