//! Trigger Selector
//!
//! Finds the oldest pending trigger in the watched directory. Selection is
//! read-only: nothing is removed, renamed, or locked here.
//!
//! # Ordering
//!
//! - `created` (default): creation time, falling back to modification time on
//!   platforms that do not report it; ties break on the file name's byte order.
//!   Files with no timestamp at all sort ahead of timed ones.
//! - `name`: file name only, for producers that encode a monotonic counter or
//!   timestamp in the name (e.g. `20251024T000000-tpm.trigger`).

use crate::error::Result;
use crate::types::RequestHandle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// FIFO ordering strategy for pending triggers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionOrder {
    /// Oldest by filesystem timestamp, then by name
    #[default]
    Created,

    /// Lexicographic file name
    Name,
}

/// Scans the pending set for trigger files
#[derive(Debug, Clone)]
pub struct TriggerSelector {
    /// Pending directory
    dir: PathBuf,

    /// Dotted suffix, e.g. `.trigger`
    suffix: String,

    order: SelectionOrder,
}

impl TriggerSelector {
    /// Create a selector over `dir` for files ending in `.<extension>`
    pub fn new(dir: impl Into<PathBuf>, extension: &str, order: SelectionOrder) -> Self {
        Self {
            dir: dir.into(),
            suffix: format!(".{}", extension),
            order,
        }
    }

    /// Pending directory this selector watches
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The single oldest pending trigger, or `None` when the set is empty
    /// or the directory does not exist
    pub fn select_next(&self) -> Result<Option<RequestHandle>> {
        let next = self
            .scan()?
            .into_iter()
            .min_by(|a, b| self.compare(a, b));

        match &next {
            Some(handle) => debug!("Selected trigger: {}", handle.name),
            None => debug!("No pending triggers in {}", self.dir.display()),
        }

        Ok(next)
    }

    /// Every pending trigger in selection order
    pub fn pending(&self) -> Result<Vec<RequestHandle>> {
        let mut handles = self.scan()?;
        handles.sort_by(|a, b| self.compare(a, b));
        Ok(handles)
    }

    /// Whether `name` follows the trigger naming convention
    pub fn is_trigger_name(&self, name: &str) -> bool {
        name.strip_suffix(self.suffix.as_str())
            .map(|stem| !stem.is_empty())
            .unwrap_or(false)
    }

    fn scan(&self) -> Result<Vec<RequestHandle>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut handles = Vec::new();
        for entry in entries {
            let entry = entry?;

            // Archive subdirectories live under the pending dir by default
            if !entry.file_type()?.is_file() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                debug!("Skipping non-UTF-8 file name in {}", self.dir.display());
                continue;
            };

            if !self.is_trigger_name(&name) {
                continue;
            }

            let metadata = entry.metadata()?;
            let queued_at = metadata
                .created()
                .or_else(|_| metadata.modified())
                .ok()
                .map(DateTime::<Utc>::from);

            handles.push(RequestHandle {
                path: entry.path(),
                name,
                queued_at,
            });
        }

        Ok(handles)
    }

    fn compare(&self, a: &RequestHandle, b: &RequestHandle) -> Ordering {
        match self.order {
            SelectionOrder::Created => a
                .queued_at
                .cmp(&b.queued_at)
                .then_with(|| a.name.cmp(&b.name)),
            SelectionOrder::Name => a.name.cmp(&b.name),
        }
    }
}
