//! Baton - File-Based Agent Handoff for Claude Code
//!
//! Agent sessions never talk to each other directly. Instead a finishing
//! session drops a `.trigger` file describing who should run next, and the
//! Stop hook picks it up when the session ends:
//! - Oldest pending trigger first (FIFO)
//! - Schema validation with operator-facing diagnostics
//! - Append-only handoff log at `.claude/agent-handoff.log`
//! - Completed and failed archives so nothing is processed twice
//!
//! # Architecture
//!
//! - **Triggers**: selector, processor, ledger and archive (the core)
//! - **Hook**: stdin capture, reporting and notification around the core
//! - **Config**: optional `.claude/baton.toml`
//!
//! # Example
//!
//! ```ignore
//! use baton_core::{HandoffConfig, HandoffEngine, Outcome};
//!
//! let engine = HandoffEngine::from_config(&HandoffConfig::default(), Path::new("."));
//! if let Some(Outcome::Handoff(handoff)) = engine.run_once()? {
//!     println!("next: {} ({})", handoff.agent, handoff.command);
//! }
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod hook;
pub mod notify;
pub mod report;
pub mod triggers;
pub mod types;

// Re-export commonly used types
pub use config::{HandoffConfig, HandoffPaths};
pub use error::{BatonError, Result};
pub use hook::StopHook;
pub use notify::{DesktopNotifier, NoopNotifier, Notifier};
pub use triggers::{HandoffEngine, SelectionOrder, TriggerProcessor, TriggerSelector};
pub use types::{
    Handoff, HandoffRequest, Malformed, MalformedReason, Outcome, RequestHandle, RequiredField,
};
