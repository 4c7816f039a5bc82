//! Trigger Processor
//!
//! Turns one selected trigger into an `Outcome`:
//!
//! 1. Parse the file as JSON. Broken syntax → `Malformed(InvalidFormat)`.
//! 2. Check `to_agent`, `command` and `message` are strings. Otherwise →
//!    `Malformed(MissingFields)`.
//! 3. Valid: append a line to the handoff log, then move the file to the
//!    completed archive.
//! 4. Malformed: move the file to the failed archive with a prefix.
//!
//! Log and archive failures are returned as errors and never retried here.

use crate::error::Result;
use crate::triggers::archive::TriggerArchive;
use crate::triggers::ledger::{HandoffLedger, LogEntry};
use crate::types::{Handoff, HandoffRequest, Malformed, MalformedReason, Outcome, RequestHandle};
use serde_json::Value;
use std::fs;
use tracing::{debug, info, warn};

/// Parse and validate raw trigger content
pub fn parse_trigger(raw: &[u8]) -> std::result::Result<HandoffRequest, MalformedReason> {
    let value: Value = serde_json::from_slice(raw).map_err(|e| MalformedReason::InvalidFormat {
        detail: e.to_string(),
    })?;

    HandoffRequest::from_value(&value).map_err(MalformedReason::MissingFields)
}

/// Validates, logs and archives triggers
#[derive(Debug, Clone)]
pub struct TriggerProcessor {
    ledger: HandoffLedger,
    archive: TriggerArchive,
}

impl TriggerProcessor {
    pub fn new(ledger: HandoffLedger, archive: TriggerArchive) -> Self {
        Self { ledger, archive }
    }

    pub fn ledger(&self) -> &HandoffLedger {
        &self.ledger
    }

    pub fn archive(&self) -> &TriggerArchive {
        &self.archive
    }

    /// Consume one trigger
    ///
    /// On `Ok` the trigger has left the pending set. On `Err` it may still be
    /// pending (log append or move failed) and is left for the next run.
    pub fn process(&self, handle: &RequestHandle) -> Result<Outcome> {
        debug!("Processing trigger: {}", handle.path.display());

        let raw = fs::read(&handle.path)?;

        match parse_trigger(&raw) {
            Ok(request) => {
                self.ledger.append(&LogEntry::now(&request))?;
                let archived_to = self.archive.complete(handle)?;

                info!(
                    "Handoff {} -> {} from {}",
                    request.from_agent, request.to_agent, handle.name
                );

                Ok(Outcome::Handoff(Handoff {
                    agent: request.to_agent,
                    command: request.command,
                    message: request.message,
                    from_agent: request.from_agent,
                    trigger: handle.name.clone(),
                    archived_to,
                }))
            }
            Err(reason) => {
                if let MalformedReason::InvalidFormat { detail } = &reason {
                    debug!("Parse error in {}: {}", handle.name, detail);
                }

                let archived_to = self.archive.reject(handle)?;

                warn!("Malformed trigger {}: {}", handle.name, reason);

                Ok(Outcome::Malformed(Malformed {
                    trigger: handle.name.clone(),
                    reason,
                    archived_to,
                }))
            }
        }
    }
}
