//! Baton - File-Based Agent Handoff for Claude Code
//!
//! Entry point for the `baton` binary. `baton stop` is wired as the Claude
//! Code Stop hook; `baton status` shows the pending queue and `baton init`
//! sets up a project.

mod cli;

use baton_core::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "baton")]
#[command(about = "File-based agent handoff hook for Claude Code", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root containing `.claude/` (defaults to the current directory)
    #[arg(long, global = true, env = "BATON_ROOT")]
    root: Option<PathBuf>,

    /// Config file (defaults to `<root>/.claude/baton.toml`)
    #[arg(long, global = true, env = "BATON_CONFIG")]
    config: Option<PathBuf>,

    /// Set log level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the next pending trigger (Claude Code Stop hook, always exits 0)
    Stop {
        /// Skip the desktop notification
        #[arg(long)]
        no_notify: bool,
    },

    /// Write a default config and create the trigger directories
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show pending triggers and archive counts
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("baton={},baton_core={}", level, level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Baton v{} starting...", env!("CARGO_PKG_VERSION"));

    let root = cli::helpers::project_root(cli.root);
    let config_path = cli::helpers::config_path(&root, cli.config);

    match cli.command.unwrap_or(Commands::Stop { no_notify: false }) {
        Commands::Stop { no_notify } => {
            cli::stop::handle(root, config_path, !no_notify).await;
            Ok(())
        }
        Commands::Init { force } => cli::init::handle(&root, &config_path, force),
        Commands::Status { json } => cli::status::handle(&root, &config_path, json),
    }
}
