//! Queue status command

use baton_core::{
    error::Result, HandoffConfig, HandoffEngine, RequestHandle, TriggerSelector,
};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Serialize)]
struct StatusReport {
    pending: Vec<RequestHandle>,
    processed: usize,
    failed: usize,
    last_handoff: Option<String>,
}

/// Handle status command
pub fn handle(root: &Path, config_path: &Path, json: bool) -> Result<()> {
    debug!("Reading trigger queue under {}", root.display());

    let config = HandoffConfig::load(config_path)?;
    let engine = HandoffEngine::from_config(&config, root);
    let archive = engine.processor().archive();

    let count = |dir: &Path| -> Result<usize> {
        let selector = TriggerSelector::new(dir, &config.triggers.extension, config.triggers.order);
        Ok(selector.pending()?.len())
    };

    let report = StatusReport {
        pending: engine.selector().pending()?,
        processed: count(archive.processed_dir())?,
        failed: count(archive.failed_dir())?,
        last_handoff: last_line(engine.processor().ledger().path())?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.pending.is_empty() {
        println!("No pending triggers");
    } else {
        println!("Pending triggers ({}):", report.pending.len());
        for (i, handle) in report.pending.iter().enumerate() {
            match handle.queued_at {
                Some(at) => println!(
                    "  {}. {}  ({})",
                    i + 1,
                    handle.name,
                    at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                None => println!("  {}. {}", i + 1, handle.name),
            }
        }
    }

    println!();
    println!("Processed: {}   Failed: {}", report.processed, report.failed);
    if let Some(line) = &report.last_handoff {
        println!("Last handoff: {}", line);
    }

    Ok(())
}

fn last_line(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content.lines().last().map(str::to_string)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
