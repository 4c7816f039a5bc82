//! Handoff Log
//!
//! Append-only audit trail with one line per successful handoff:
//!
//! ```text
//! [2025-10-24T00:00:00.000000Z] senior-engineer -> tpm: 5 subtasks ready
//! ```
//!
//! Each line is formatted in memory and handed to the OS in a single
//! `write_all` on an append-mode handle, so readers never see half a line.

use crate::error::{BatonError, Result};
use crate::types::HandoffRequest;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One handoff record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub from_agent: String,
    pub to_agent: String,
    pub message: String,
}

impl LogEntry {
    /// Entry for `request`, stamped with the current UTC time
    pub fn now(request: &HandoffRequest) -> Self {
        Self::at(Utc::now(), request)
    }

    pub fn at(timestamp: DateTime<Utc>, request: &HandoffRequest) -> Self {
        Self {
            timestamp,
            from_agent: request.from_agent.clone(),
            to_agent: request.to_agent.clone(),
            message: request.message.clone(),
        }
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}Z] {} -> {}: {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f"),
            single_line(&self.from_agent),
            single_line(&self.to_agent),
            single_line(&self.message)
        )
    }
}

/// Line breaks inside a field would split one entry across lines
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Writer for the handoff log
#[derive(Debug, Clone)]
pub struct HandoffLedger {
    path: PathBuf,
}

impl HandoffLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the log and its parent directory if needed
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        let fail = |source: std::io::Error| BatonError::LogAppend {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(fail)?;
        }

        let line = format!("{}\n", entry);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(fail)?;

        file.write_all(line.as_bytes()).map_err(fail)?;
        file.flush().map_err(fail)?;
        file.sync_data().map_err(fail)?;

        debug!("Appended handoff entry to {}", self.path.display());
        Ok(())
    }
}
