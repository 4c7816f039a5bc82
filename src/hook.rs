//! Stop hook
//!
//! Runs once when an agent session ends:
//!
//! 1. Capture the stop-hook payload to the debug log
//! 2. Consume at most one pending trigger
//! 3. Print a banner (handoff) or diagnostic (malformed) to stderr
//! 4. Fire a best-effort desktop notification for handoffs
//!
//! `StopHook::run` reports processing failures to its caller. The binary
//! wraps it in a fail-open boundary so the session is never blocked on
//! handoff bookkeeping.

use crate::capture::DebugCapture;
use crate::config::HandoffConfig;
use crate::error::Result;
use crate::notify::{notify_best_effort, Notifier};
use crate::report;
use crate::triggers::HandoffEngine;
use crate::types::Outcome;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct StopHook {
    engine: HandoffEngine,
    capture: DebugCapture,
    notifier: Arc<dyn Notifier>,
    notify_timeout: Duration,
    follow_up: String,
}

impl StopHook {
    pub fn new(
        engine: HandoffEngine,
        capture: DebugCapture,
        notifier: Arc<dyn Notifier>,
        notify_timeout: Duration,
        follow_up: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            capture,
            notifier,
            notify_timeout,
            follow_up: follow_up.into(),
        }
    }

    /// Build a hook for the project at `root`
    pub fn from_config(config: &HandoffConfig, root: &Path, notifier: Arc<dyn Notifier>) -> Self {
        let paths = config.paths(root);

        Self::new(
            HandoffEngine::from_config(config, root),
            DebugCapture::new(paths.debug_log),
            notifier,
            config.notifications.timeout(),
            config.report.follow_up.clone(),
        )
    }

    pub fn engine(&self) -> &HandoffEngine {
        &self.engine
    }

    /// Run the hook once, writing operator output to `out`
    pub async fn run<W: Write + Send>(
        &self,
        payload: Option<&str>,
        out: &mut W,
    ) -> Result<Option<Outcome>> {
        if let Some(raw) = payload {
            match self.capture.record(raw) {
                Ok(Some(input)) => debug!(
                    session_id = input.session_id.as_deref().unwrap_or("-"),
                    "Stop hook invoked"
                ),
                Ok(None) => {}
                Err(e) => warn!("Failed to capture stop hook payload: {}", e),
            }
        }

        let outcome = self.engine.run_once()?;

        match &outcome {
            Some(Outcome::Handoff(handoff)) => {
                write_report(out, &report::handoff_banner(handoff, &self.follow_up));
                notify_best_effort(self.notifier.as_ref(), handoff, self.notify_timeout).await;
            }
            Some(Outcome::Malformed(malformed)) => {
                write_report(out, &report::malformed_diagnostic(malformed));
            }
            None => debug!("No handoff pending"),
        }

        Ok(outcome)
    }
}

/// Operator output is best-effort; a closed stderr must not fail the hook
fn write_report<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
        debug!("Failed to write hook report: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MockNotifier;
    use std::fs;
    use tempfile::TempDir;

    fn hook(root: &Path, notifier: MockNotifier) -> StopHook {
        StopHook::from_config(&HandoffConfig::default(), root, Arc::new(notifier))
    }

    fn write_trigger(root: &Path, name: &str, content: &str) {
        let dir = root.join(".claude").join("triggers");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn test_handoff_prints_banner_and_notifies() {
        let temp = TempDir::new().unwrap();
        write_trigger(
            temp.path(),
            "valid.trigger",
            r#"{"from_agent":"a","to_agent":"qa-engineer","command":"Review","message":"PR ready"}"#,
        );

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|_, _| Ok(()));

        let mut out = Vec::new();
        let outcome = hook(temp.path(), notifier)
            .run(Some(r#"{"conversation_id":"test"}"#), &mut out)
            .await
            .unwrap();

        assert!(matches!(outcome, Some(Outcome::Handoff(_))));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("AGENT HANDOFF READY"));
        assert!(text.contains("Next Agent: qa-engineer"));
        assert!(temp.path().join("logs").join("stop.json").exists());
    }

    #[tokio::test]
    async fn test_malformed_prints_diagnostic_without_notifying() {
        let temp = TempDir::new().unwrap();
        write_trigger(temp.path(), "broken.trigger", "{invalid json}");

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let mut out = Vec::new();
        let outcome = hook(temp.path(), notifier).run(None, &mut out).await.unwrap();

        assert!(matches!(outcome, Some(Outcome::Malformed(_))));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Malformed trigger file broken.trigger"));
    }

    #[tokio::test]
    async fn test_failed_notification_keeps_handoff() {
        let temp = TempDir::new().unwrap();
        write_trigger(
            temp.path(),
            "valid.trigger",
            r#"{"to_agent":"tpm","command":"Plan","message":"ready"}"#,
        );

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|_, _| {
            Err(crate::error::BatonError::Notification("no display".to_string()))
        });

        let mut out = Vec::new();
        let outcome = hook(temp.path(), notifier).run(None, &mut out).await.unwrap();

        assert!(matches!(outcome, Some(Outcome::Handoff(_))));
        assert!(temp
            .path()
            .join(".claude/triggers/processed/valid.trigger")
            .exists());
    }

    #[tokio::test]
    async fn test_bad_payload_does_not_block_processing() {
        let temp = TempDir::new().unwrap();
        write_trigger(
            temp.path(),
            "valid.trigger",
            r#"{"to_agent":"tpm","command":"Plan","message":"ready"}"#,
        );

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().returning(|_, _| Ok(()));

        let mut out = Vec::new();
        let outcome = hook(temp.path(), notifier)
            .run(Some("not json at all"), &mut out)
            .await
            .unwrap();

        assert!(matches!(outcome, Some(Outcome::Handoff(_))));
        assert!(!temp.path().join("logs").join("stop.json").exists());
    }

    #[tokio::test]
    async fn test_empty_pending_set_is_quiet() {
        let temp = TempDir::new().unwrap();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let mut out = Vec::new();
        let outcome = hook(temp.path(), notifier).run(None, &mut out).await.unwrap();

        assert!(outcome.is_none());
        assert!(out.is_empty());
    }
}
