//! Trigger handling
//!
//! Agent sessions hand work to the next role by dropping a `.trigger` JSON
//! file into `.claude/triggers/`. When a session ends, the Stop hook runs the
//! `HandoffEngine` once:
//!
//! - **Selector**: pick the oldest pending trigger
//! - **Processor**: validate it, append to the handoff log, archive it
//!
//! ```text
//! .claude/triggers/x.trigger ──valid────► .claude/triggers/processed/x.trigger
//!                            └─malformed─► .claude/triggers/failed/malformed-x.trigger
//! ```
//!
//! At most one trigger is consumed per run. There is no locking: the hook
//! assumes it is never run concurrently against the same project. Hosts that
//! cannot guarantee that should claim the trigger with an atomic rename into
//! a private state before processing.

pub mod archive;
pub mod ledger;
pub mod processor;
pub mod selector;

pub use archive::TriggerArchive;
pub use ledger::{HandoffLedger, LogEntry};
pub use processor::{parse_trigger, TriggerProcessor};
pub use selector::{SelectionOrder, TriggerSelector};

use crate::config::HandoffConfig;
use crate::error::Result;
use crate::types::Outcome;
use std::path::Path;

/// One-shot composition of selector and processor
#[derive(Debug, Clone)]
pub struct HandoffEngine {
    selector: TriggerSelector,
    processor: TriggerProcessor,
}

impl HandoffEngine {
    pub fn new(selector: TriggerSelector, processor: TriggerProcessor) -> Self {
        Self {
            selector,
            processor,
        }
    }

    /// Build an engine for the project at `root`
    pub fn from_config(config: &HandoffConfig, root: &Path) -> Self {
        let paths = config.paths(root);

        let selector = TriggerSelector::new(
            paths.pending,
            &config.triggers.extension,
            config.triggers.order,
        );
        let processor = TriggerProcessor::new(
            HandoffLedger::new(paths.handoff_log),
            TriggerArchive::new(
                paths.processed,
                paths.failed,
                config.triggers.malformed_prefix.clone(),
            ),
        );

        Self::new(selector, processor)
    }

    pub fn selector(&self) -> &TriggerSelector {
        &self.selector
    }

    pub fn processor(&self) -> &TriggerProcessor {
        &self.processor
    }

    /// Consume at most one pending trigger
    ///
    /// Returns `Ok(None)` when nothing is pending.
    pub fn run_once(&self) -> Result<Option<Outcome>> {
        match self.selector.select_next()? {
            Some(handle) => self.processor.process(&handle).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn engine(root: &Path) -> HandoffEngine {
        HandoffEngine::from_config(&HandoffConfig::default(), root)
    }

    #[test]
    fn test_empty_run_touches_nothing() {
        let temp = TempDir::new().unwrap();

        assert!(engine(temp.path()).run_once().unwrap().is_none());

        assert!(!temp.path().join(".claude").exists());
    }

    #[test]
    fn test_run_once_consumes_single_trigger() {
        let temp = TempDir::new().unwrap();
        let pending = temp.path().join(".claude").join("triggers");
        fs::create_dir_all(&pending).unwrap();
        for name in ["1.trigger", "2.trigger", "3.trigger"] {
            fs::write(
                pending.join(name),
                r#"{"to_agent":"qa","command":"Review","message":"ready"}"#,
            )
            .unwrap();
        }

        let engine = engine(temp.path());
        let outcome = engine.run_once().unwrap().unwrap();

        assert!(matches!(outcome, Outcome::Handoff(_)));
        assert_eq!(engine.selector().pending().unwrap().len(), 2);

        let processed = fs::read_dir(pending.join("processed")).unwrap().count();
        assert_eq!(processed, 1);
    }
}
