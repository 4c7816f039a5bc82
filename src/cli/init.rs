//! Project initialization command

use anyhow::Context;
use baton_core::{error::Result, HandoffConfig};
use std::path::Path;
use tracing::debug;

/// Handle init command: write a default config and create the trigger directories
pub fn handle(root: &Path, config_path: &Path, force: bool) -> Result<()> {
    debug!("Initializing baton under {}", root.display());

    let config = if config_path.exists() && !force {
        println!(" Keeping existing config: {}", config_path.display());
        HandoffConfig::load(config_path)?
    } else {
        let config = HandoffConfig::default();
        config.save(config_path)?;
        println!(" Wrote config: {}", config_path.display());
        config
    };

    let paths = config.paths(root);
    for dir in [&paths.pending, &paths.processed, &paths.failed] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        debug!("Created directory: {}", dir.display());
    }

    println!(" Trigger queue ready: {}", paths.pending.display());
    Ok(())
}
