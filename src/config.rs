//! Configuration for the handoff hook
//!
//! Every setting has a default, so the config file is optional. Relative
//! paths are resolved against the project root the hook runs in.
//!
//! # Configuration File Format
//!
//! TOML format in `.claude/baton.toml`:
//!
//! ```toml
//! [triggers]
//! dir = ".claude/triggers"
//! extension = "trigger"
//! processed_dir = ".claude/triggers/processed"
//! failed_dir = ".claude/triggers/failed"
//! malformed_prefix = "malformed-"
//! order = "created"
//!
//! [log]
//! handoff_log = ".claude/agent-handoff.log"
//! debug_log = "logs/stop.json"
//!
//! [notifications]
//! enabled = true
//! timeout_ms = 2000
//! sound = "Purr"
//!
//! [report]
//! follow_up = "starforge use {agent}"
//! ```

use crate::error::{BatonError, Result};
use crate::triggers::selector::SelectionOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete configuration for the handoff hook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandoffConfig {
    /// Pending set and archive locations
    #[serde(default)]
    pub triggers: TriggerSettings,

    /// Handoff log and debug capture
    #[serde(default)]
    pub log: LogSettings,

    /// Desktop notification settings
    #[serde(default)]
    pub notifications: NotificationSettings,

    /// Banner settings
    #[serde(default)]
    pub report: ReportSettings,
}

/// Trigger directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerSettings {
    /// Pending set
    #[serde(default = "default_trigger_dir")]
    pub dir: String,

    /// File extension (without the dot) marking a trigger
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Completed archive
    #[serde(default = "default_processed_dir")]
    pub processed_dir: String,

    /// Failed archive
    #[serde(default = "default_failed_dir")]
    pub failed_dir: String,

    /// Prefix added to triggers moved into the failed archive
    #[serde(default = "default_malformed_prefix")]
    pub malformed_prefix: String,

    /// FIFO ordering strategy
    #[serde(default)]
    pub order: SelectionOrder,
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            dir: default_trigger_dir(),
            extension: default_extension(),
            processed_dir: default_processed_dir(),
            failed_dir: default_failed_dir(),
            malformed_prefix: default_malformed_prefix(),
            order: SelectionOrder::default(),
        }
    }
}

/// Log file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Append-only audit trail of handoffs
    #[serde(default = "default_handoff_log")]
    pub handoff_log: String,

    /// Raw stop-hook payloads, one JSON document per line
    #[serde(default = "default_debug_log")]
    pub debug_log: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            handoff_log: default_handoff_log(),
            debug_log: default_debug_log(),
        }
    }
}

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Enable desktop notifications
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Upper bound on the notifier process, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// macOS sound name
    #[serde(default = "default_sound")]
    pub sound: Option<String>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: default_timeout_ms(),
            sound: default_sound(),
        }
    }
}

impl NotificationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Banner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Suggested follow-up command; `{agent}` is replaced with the next role
    #[serde(default = "default_follow_up")]
    pub follow_up: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            follow_up: default_follow_up(),
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_trigger_dir() -> String {
    ".claude/triggers".to_string()
}

fn default_extension() -> String {
    "trigger".to_string()
}

fn default_processed_dir() -> String {
    ".claude/triggers/processed".to_string()
}

fn default_failed_dir() -> String {
    ".claude/triggers/failed".to_string()
}

fn default_malformed_prefix() -> String {
    "malformed-".to_string()
}

fn default_handoff_log() -> String {
    ".claude/agent-handoff.log".to_string()
}

fn default_debug_log() -> String {
    "logs/stop.json".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_sound() -> Option<String> {
    Some("Purr".to_string())
}

fn default_follow_up() -> String {
    "starforge use {agent}".to_string()
}

/// Absolute locations derived from a config and a project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffPaths {
    pub pending: PathBuf,
    pub processed: PathBuf,
    pub failed: PathBuf,
    pub handoff_log: PathBuf,
    pub debug_log: PathBuf,
}

impl HandoffConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found, using defaults: {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            BatonError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file: {}", e),
            ))
        })?;

        let config: HandoffConfig = toml::from_str(&content)
            .map_err(|e| BatonError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| BatonError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BatonError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create config directory: {}", e),
                ))
            })?;
        }

        std::fs::write(path, content).map_err(|e| {
            BatonError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config file: {}", e),
            ))
        })?;

        tracing::debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Reject settings that would break trigger identity
    pub fn validate(&self) -> Result<()> {
        let triggers = &self.triggers;

        if triggers.extension.is_empty() || triggers.extension.contains(['/', '.']) {
            return Err(BatonError::Config(format!(
                "Invalid trigger extension: {:?}",
                triggers.extension
            )));
        }

        if triggers.malformed_prefix.is_empty() || triggers.malformed_prefix.contains('/') {
            return Err(BatonError::Config(format!(
                "Invalid malformed prefix: {:?}",
                triggers.malformed_prefix
            )));
        }

        // Pending, processed and failed sets must stay disjoint
        let paths = self.paths(Path::new("/"));
        let dirs = [
            ("dir", &paths.pending),
            ("processed_dir", &paths.processed),
            ("failed_dir", &paths.failed),
        ];
        for (i, (name, dir)) in dirs.iter().enumerate() {
            if let Some((other, _)) = dirs[i + 1..].iter().find(|(_, d)| d == dir) {
                return Err(BatonError::Config(format!(
                    "{} and {} must differ: {}",
                    name,
                    other,
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Resolve every configured location against `root`
    pub fn paths(&self, root: &Path) -> HandoffPaths {
        HandoffPaths {
            pending: resolve(root, &self.triggers.dir),
            processed: resolve(root, &self.triggers.processed_dir),
            failed: resolve(root, &self.triggers.failed_dir),
            handoff_log: resolve(root, &self.log.handoff_log),
            debug_log: resolve(root, &self.log.debug_log),
        }
    }

    /// Get default config path for a project
    pub fn default_path() -> PathBuf {
        PathBuf::from(".claude/baton.toml")
    }
}

fn resolve(root: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
