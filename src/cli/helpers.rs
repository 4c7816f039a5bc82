//! Shared helper functions for CLI commands

use baton_core::HandoffConfig;
use std::path::{Path, PathBuf};

/// Project root from CLI arg (or BATON_ROOT), falling back to the current directory
pub fn project_root(cli_root: Option<PathBuf>) -> PathBuf {
    cli_root
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Config file from CLI arg (or BATON_CONFIG), falling back to the project default
pub fn config_path(root: &Path, cli_config: Option<PathBuf>) -> PathBuf {
    cli_config.unwrap_or_else(|| root.join(HandoffConfig::default_path()))
}
