//! Completed and failed archives
//!
//! A consumed trigger leaves the pending set by a single `rename`. That
//! rename is the commit point: until it succeeds the trigger is still pending
//! and will be selected again by the next invocation.
//!
//! Both archives must live on the same filesystem as the pending set.

use crate::error::{BatonError, Result};
use crate::types::RequestHandle;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Terminal storage for processed triggers
#[derive(Debug, Clone)]
pub struct TriggerArchive {
    processed: PathBuf,
    failed: PathBuf,
    malformed_prefix: String,
}

impl TriggerArchive {
    pub fn new(
        processed: impl Into<PathBuf>,
        failed: impl Into<PathBuf>,
        malformed_prefix: impl Into<String>,
    ) -> Self {
        Self {
            processed: processed.into(),
            failed: failed.into(),
            malformed_prefix: malformed_prefix.into(),
        }
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed
    }

    pub fn failed_dir(&self) -> &Path {
        &self.failed
    }

    /// Move a handled trigger into the completed archive under its own name
    pub fn complete(&self, handle: &RequestHandle) -> Result<PathBuf> {
        relocate(&handle.path, &self.processed, &handle.name)
    }

    /// Move a malformed trigger into the failed archive as `<prefix><name>`
    pub fn reject(&self, handle: &RequestHandle) -> Result<PathBuf> {
        let name = format!("{}{}", self.malformed_prefix, handle.name);
        relocate(&handle.path, &self.failed, &name)
    }
}

fn relocate(from: &Path, dir: &Path, name: &str) -> Result<PathBuf> {
    let to = dir.join(name);
    let fail = |source: std::io::Error| BatonError::Archive {
        from: from.to_path_buf(),
        to: to.clone(),
        source,
    };

    fs::create_dir_all(dir).map_err(fail)?;

    if to.exists() {
        debug!("Replacing existing archive entry {}", to.display());
    }

    fs::rename(from, &to).map_err(fail)?;

    debug!("Archived {} -> {}", from.display(), to.display());
    Ok(to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pending(dir: &Path, name: &str) -> RequestHandle {
        let path = dir.join(name);
        fs::write(&path, "{}").unwrap();
        RequestHandle {
            path,
            name: name.to_string(),
            queued_at: None,
        }
    }

    fn archive(root: &Path) -> TriggerArchive {
        TriggerArchive::new(root.join("processed"), root.join("failed"), "malformed-")
    }

    #[test]
    fn test_complete_keeps_name() {
        let temp = TempDir::new().unwrap();
        let handle = pending(temp.path(), "a.trigger");

        let to = archive(temp.path()).complete(&handle).unwrap();

        assert_eq!(to, temp.path().join("processed").join("a.trigger"));
        assert!(to.exists());
        assert!(!handle.path.exists());
    }

    #[test]
    fn test_reject_adds_prefix() {
        let temp = TempDir::new().unwrap();
        let handle = pending(temp.path(), "b.trigger");

        let to = archive(temp.path()).reject(&handle).unwrap();

        assert_eq!(to, temp.path().join("failed").join("malformed-b.trigger"));
        assert!(to.exists());
        assert!(!handle.path.exists());
        assert!(!temp.path().join("processed").exists());
    }

    #[test]
    fn test_missing_source_is_archive_error() {
        let temp = TempDir::new().unwrap();
        let handle = RequestHandle {
            path: temp.path().join("gone.trigger"),
            name: "gone.trigger".to_string(),
            queued_at: None,
        };

        let err = archive(temp.path()).complete(&handle).unwrap_err();
        assert!(matches!(err, BatonError::Archive { .. }));
    }

    #[test]
    fn test_archive_dir_blocked_by_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("processed"), "not a directory").unwrap();
        let handle = pending(temp.path(), "c.trigger");

        let err = archive(temp.path()).complete(&handle).unwrap_err();

        assert!(matches!(err, BatonError::Archive { .. }));
        assert!(handle.path.exists(), "trigger must stay pending when the move fails");
    }
}
