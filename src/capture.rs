//! Stop-hook payload capture
//!
//! Keeps a JSON-lines record of every payload Claude Code hands the Stop
//! hook, for debugging hook wiring. Unusable payloads are skipped, never
//! fatal.

use crate::error::Result;
use crate::types::StopHookInput;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Appends stop-hook payloads to a debug log
#[derive(Debug, Clone)]
pub struct DebugCapture {
    path: PathBuf,
}

impl DebugCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `raw` as one compact JSON line
    ///
    /// Returns `Ok(None)` when the payload is empty or not JSON. I/O errors
    /// on the debug log are returned.
    pub fn record(&self, raw: &str) -> Result<Option<StopHookInput>> {
        let raw = raw.trim();
        if raw.is_empty() {
            debug!("Empty stop hook payload, nothing to capture");
            return Ok(None);
        }

        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stop hook payload is not JSON, skipping capture: {}", e);
                return Ok(None);
            }
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let line = format!("{}\n", serde_json::to_string(&value)?);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        debug!("Captured stop hook payload to {}", self.path.display());

        Ok(Some(serde_json::from_value(value).unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_appends_compact_lines() {
        let temp = TempDir::new().unwrap();
        let capture = DebugCapture::new(temp.path().join("logs").join("stop.json"));

        capture
            .record("{\n  \"conversation_id\": \"test\"\n}")
            .unwrap();
        let input = capture
            .record(r#"{"session_id":"abc","stop_hook_active":false}"#)
            .unwrap()
            .unwrap();

        assert_eq!(input.session_id.as_deref(), Some("abc"));
        assert_eq!(input.stop_hook_active, Some(false));

        let content = fs::read_to_string(capture.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec![
            r#"{"conversation_id":"test"}"#,
            r#"{"session_id":"abc","stop_hook_active":false}"#,
        ]);
    }

    #[test]
    fn test_invalid_payload_is_skipped() {
        let temp = TempDir::new().unwrap();
        let capture = DebugCapture::new(temp.path().join("stop.json"));

        assert!(capture.record("not json").unwrap().is_none());
        assert!(capture.record("   ").unwrap().is_none());
        assert!(!capture.path().exists());
    }

    #[test]
    fn test_non_object_payload_is_captured() {
        let temp = TempDir::new().unwrap();
        let capture = DebugCapture::new(temp.path().join("stop.json"));

        let input = capture.record("[1,2]").unwrap().unwrap();

        assert!(input.session_id.is_none());
        assert_eq!(fs::read_to_string(capture.path()).unwrap(), "[1,2]\n");
    }
}
