//! Error types for the baton handoff hook
//!
//! Structured errors use thiserror; anyhow is accepted at the edges and
//! folded into `BatonError::Other`.
//!
//! Malformed trigger files are deliberately absent from this taxonomy: a
//! parse or schema failure is a normal `Outcome::Malformed`, not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for baton operations
#[derive(Error, Debug)]
pub enum BatonError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Appending to the handoff log failed
    #[error("Failed to append to handoff log {}: {source}", path.display())]
    LogAppend {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Moving a trigger into its archive failed (the commit point)
    #[error("Failed to archive trigger {} -> {}: {source}", from.display(), to.display())]
    Archive {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Desktop notification failed or timed out
    #[error("Notification error: {0}")]
    Notification(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for baton operations
pub type Result<T> = std::result::Result<T, BatonError>;

/// Convert anyhow::Error to BatonError
impl From<anyhow::Error> for BatonError {
    fn from(err: anyhow::Error) -> Self {
        BatonError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = BatonError::Config("bad order".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad order");
    }

    #[test]
    fn test_archive_error_names_both_paths() {
        let err = BatonError::Archive {
            from: PathBuf::from(".claude/triggers/a.trigger"),
            to: PathBuf::from(".claude/triggers/processed/a.trigger"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let text = err.to_string();
        assert!(text.contains(".claude/triggers/a.trigger"));
        assert!(text.contains("processed/a.trigger"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let baton_err: BatonError = io_err.into();
        assert!(matches!(baton_err, BatonError::Io(_)));

        let any_err = anyhow::anyhow!("context lost");
        let baton_err: BatonError = any_err.into();
        assert_eq!(baton_err.to_string(), "context lost");
    }
}
