//! Core data types for the baton handoff hook
//!
//! This module defines the trigger record an agent session leaves behind, the
//! handle the selector hands to the processor, and the outcome the processor
//! reports back to the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Origin role recorded when a trigger omits `from_agent`
pub const UNKNOWN_AGENT: &str = "unknown";

/// Fields every trigger must carry as JSON strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    ToAgent,
    Command,
    Message,
}

impl RequiredField {
    /// All required fields, in the order diagnostics list them
    pub const ALL: [RequiredField; 3] = [
        RequiredField::ToAgent,
        RequiredField::Command,
        RequiredField::Message,
    ];

    /// JSON key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::ToAgent => "to_agent",
            RequiredField::Command => "command",
            RequiredField::Message => "message",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join field names as `a, b, c`
pub fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(RequiredField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated handoff request read from a `.trigger` file
///
/// Example on disk:
///
/// ```json
/// {
///   "from_agent": "senior-engineer",
///   "to_agent": "tpm",
///   "action": "create_tickets",
///   "message": "5 subtasks ready",
///   "command": "Use tpm. Create GitHub issues from breakdown.",
///   "context": {"feature": "name", "subtasks": 5},
///   "timestamp": "2025-10-24T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffRequest {
    /// Originating role ("unknown" when the producer left it out)
    pub from_agent: String,

    /// Role that should run next
    pub to_agent: String,

    /// Instruction text for the next session
    pub command: String,

    /// Short human-readable summary
    pub message: String,

    /// Producer-defined action tag, not interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Free-form context, not interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Producer timestamp, not interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl HandoffRequest {
    /// Validate a parsed JSON document against the trigger schema
    ///
    /// A required field that is absent, null, or not a string counts as
    /// missing. A document that is not an object is missing every field.
    /// On failure the missing fields are returned in `RequiredField::ALL` order.
    pub fn from_value(value: &Value) -> std::result::Result<Self, Vec<RequiredField>> {
        let empty = Map::new();
        let object = value.as_object().unwrap_or(&empty);

        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        let missing: Vec<RequiredField> = RequiredField::ALL
            .into_iter()
            .filter(|field| text(field.as_str()).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Self {
            from_agent: text("from_agent").unwrap_or_else(|| UNKNOWN_AGENT.to_string()),
            to_agent: text("to_agent").unwrap_or_default(),
            command: text("command").unwrap_or_default(),
            message: text("message").unwrap_or_default(),
            action: text("action"),
            context: object.get("context").filter(|v| !v.is_null()).cloned(),
            timestamp: text("timestamp"),
        })
    }
}

/// A pending trigger chosen by the selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestHandle {
    /// Full path inside the pending directory
    pub path: PathBuf,

    /// File name, the request's identity
    pub name: String,

    /// Creation (or modification) time used for FIFO ordering
    pub queued_at: Option<DateTime<Utc>>,
}

/// Why a trigger was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// Content is not well-formed JSON
    InvalidFormat { detail: String },

    /// Parsed, but required fields are absent or not strings
    MissingFields(Vec<RequiredField>),
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::InvalidFormat { .. } => write!(f, "invalid format"),
            MalformedReason::MissingFields(fields) => {
                write!(f, "missing fields: {}", join_fields(fields))
            }
        }
    }
}

/// A successful handoff, ready to be reported
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    /// Next role (`to_agent`)
    pub agent: String,
    pub command: String,
    pub message: String,
    pub from_agent: String,

    /// Trigger file name
    pub trigger: String,

    /// Where the trigger now lives in the completed archive
    pub archived_to: PathBuf,
}

/// A rejected trigger, already moved to the failed archive
#[derive(Debug, Clone, PartialEq)]
pub struct Malformed {
    /// Trigger file name as it was in the pending set
    pub trigger: String,
    pub reason: MalformedReason,
    pub archived_to: PathBuf,
}

/// Result of processing one trigger
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Handoff(Handoff),
    Malformed(Malformed),
}

impl Outcome {
    /// Trigger file name this outcome refers to
    pub fn trigger(&self) -> &str {
        match self {
            Outcome::Handoff(h) => &h.trigger,
            Outcome::Malformed(m) => &m.trigger,
        }
    }

    /// Archive location of the consumed trigger
    pub fn archived_to(&self) -> &PathBuf {
        match self {
            Outcome::Handoff(h) => &h.archived_to,
            Outcome::Malformed(m) => &m.archived_to,
        }
    }
}

/// Payload Claude Code writes to the Stop hook's stdin
///
/// Only used for tracing context; unknown keys are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopHookInput {
    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default)]
    pub transcript_path: Option<String>,

    #[serde(default)]
    pub hook_event_name: Option<String>,

    #[serde(default)]
    pub stop_hook_active: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
