//! Desktop notifications
//!
//! Best-effort only. A notifier that fails, is missing, or hangs never
//! changes what the hook reports: `notify_best_effort` bounds the call with a
//! timeout and swallows every error.

use crate::error::{BatonError, Result};
use crate::types::Handoff;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Something that can put a short message in front of the operator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// OS notification center: `osascript` on macOS, `notify-send` elsewhere
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier {
    /// macOS sound name
    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    sound: Option<String>,
}

impl DesktopNotifier {
    pub fn new(sound: Option<String>) -> Self {
        Self { sound }
    }

    #[cfg(target_os = "macos")]
    fn command(&self, title: &str, body: &str) -> Command {
        let mut cmd = Command::new("osascript");
        cmd.arg("-e")
            .arg(applescript(title, body, self.sound.as_deref()));
        cmd
    }

    #[cfg(not(target_os = "macos"))]
    fn command(&self, title: &str, body: &str) -> Command {
        let mut cmd = Command::new("notify-send");
        cmd.arg("--app-name=baton").arg(title).arg(body);
        cmd
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, title: &str, body: &str) -> Result<()> {
        let mut child = self
            .command(title, body)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            // Killed if the caller's timeout drops this future
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BatonError::Notification(format!("Failed to spawn notifier: {}", e)))?;

        let status = child
            .wait()
            .await
            .map_err(|e| BatonError::Notification(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(BatonError::Notification(format!(
                "Notifier exited with {}",
                status
            )))
        }
    }
}

/// Does nothing; used when notifications are disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _title: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

/// AppleScript for a macOS notification
pub fn applescript(title: &str, body: &str, sound: Option<&str>) -> String {
    let mut script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(body),
        escape_applescript(title)
    );
    if let Some(sound) = sound {
        script.push_str(&format!(" sound name \"{}\"", escape_applescript(sound)));
    }
    script
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Notification title for a handoff
pub fn handoff_title(agent: &str) -> String {
    format!("Agent Handoff: {}", agent)
}

/// Notify about `handoff`, giving up silently after `timeout`
pub async fn notify_best_effort(notifier: &dyn Notifier, handoff: &Handoff, timeout: Duration) {
    let title = handoff_title(&handoff.agent);

    match tokio::time::timeout(timeout, notifier.notify(&title, &handoff.message)).await {
        Ok(Ok(())) => debug!("Notification sent: {}", title),
        Ok(Err(e)) => debug!("Notification skipped: {}", e),
        Err(_) => debug!("Notification timed out after {:?}", timeout),
    }
}
