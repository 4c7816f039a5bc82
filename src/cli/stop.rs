//! Stop hook command
//!
//! Called by Claude Code when an agent session ends. Everything that can go
//! wrong here is reported on stderr and then dropped: the process exits 0 no
//! matter what, including when the hook body panics.

use baton_core::{
    error::Result, report, DesktopNotifier, HandoffConfig, NoopNotifier, Notifier, Outcome,
    StopHook,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use std::io::Read;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Upper bound on waiting for the hook payload on stdin
const STDIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle the stop command
pub async fn handle(root: PathBuf, config_path: PathBuf, notify: bool) {
    // Panics inside the task surface as a JoinError instead of aborting
    let task = tokio::spawn(async move { run(&root, &config_path, notify).await });

    match task.await {
        Ok(Ok(Some(outcome))) => debug!("Consumed trigger {}", outcome.trigger()),
        Ok(Ok(None)) => {}
        Ok(Err(e)) => eprint!("{}", report::failure_diagnostic(&e)),
        Err(e) => eprintln!("Stop hook error: {}", e),
    }
}

async fn run(root: &Path, config_path: &Path, notify: bool) -> Result<Option<Outcome>> {
    let payload = read_payload().await;
    let config = HandoffConfig::load(config_path)?;

    let notifier: Arc<dyn Notifier> = if notify && config.notifications.enabled {
        Arc::new(DesktopNotifier::new(config.notifications.sound.clone()))
    } else {
        Arc::new(NoopNotifier)
    };

    let hook = StopHook::from_config(&config, root, notifier);
    let mut stderr = std::io::stderr();
    let outcome = hook.run(payload.as_deref(), &mut stderr).await?;

    Ok(outcome)
}

/// Read the hook payload, unless stdin is an interactive terminal
///
/// The read runs on a detached OS thread. A writer that never closes stdin
/// leaves that thread parked, but the process still exits once the hook
/// returns.
async fn read_payload() -> Option<String> {
    if atty::is(atty::Stream::Stdin) {
        debug!("stdin is a terminal, no hook payload");
        return None;
    }

    let (tx, rx) = oneshot::channel();
    let spawned = std::thread::Builder::new()
        .name("baton-stdin".to_string())
        .spawn(move || {
            let mut raw = String::new();
            let read = std::io::stdin().lock().read_to_string(&mut raw);
            // Receiver is gone after a timeout
            let _ = tx.send(read.map(|_| raw));
        });

    if let Err(e) = spawned {
        warn!("Failed to start stdin reader: {}", e);
        return None;
    }

    match tokio::time::timeout(STDIN_TIMEOUT, rx).await {
        Ok(Ok(Ok(raw))) => Some(raw),
        Ok(Ok(Err(e))) => {
            warn!("Failed to read hook payload: {}", e);
            None
        }
        Ok(Err(_)) => {
            warn!("stdin reader exited without a payload");
            None
        }
        Err(_) => {
            warn!("Timed out waiting for hook payload on stdin");
            None
        }
    }
}
