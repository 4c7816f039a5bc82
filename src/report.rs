//! Operator-facing text
//!
//! Pure formatting; the hook writes these to stderr so stdout stays free for
//! machine-readable hook output.

use crate::error::BatonError;
use crate::types::{join_fields, Handoff, Malformed, MalformedReason, RequiredField};

const RULE_WIDTH: usize = 50;

/// Substitute `{agent}` in the follow-up template
pub fn follow_up_command(template: &str, agent: &str) -> String {
    template.replace("{agent}", agent)
}

/// Banner announcing a ready handoff
pub fn handoff_banner(handoff: &Handoff, follow_up_template: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);

    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule);
    out.push_str("\n🤖 AGENT HANDOFF READY\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("Next Agent: {}\n", handoff.agent));
    out.push_str(&format!("Action: {}\n", handoff.message));
    out.push_str(&format!("Command: {}\n", handoff.command));
    out.push_str(&format!(
        "\nRun: {}\n",
        follow_up_command(follow_up_template, &handoff.agent)
    ));
    out.push_str(&rule);
    out.push_str("\n\n");
    out
}

/// Diagnostic for a trigger moved to the failed archive
pub fn malformed_diagnostic(malformed: &Malformed) -> String {
    let mut out = format!(
        "Warning: Malformed trigger file {}: {}\n",
        malformed.trigger, malformed.reason
    );

    match &malformed.reason {
        MalformedReason::InvalidFormat { detail } => {
            out.push_str(&format!("  Parse error: {}\n", detail));
        }
        MalformedReason::MissingFields(missing) => {
            out.push_str(&format!(
                "  Required fields: {}\n",
                join_fields(&RequiredField::ALL)
            ));
            out.push_str(&format!("  Missing fields: {}\n", join_fields(missing)));
        }
    }

    out.push_str(&format!("  Moved to: {}\n", malformed.archived_to.display()));
    out
}

/// Diagnostic for a failure absorbed by the fail-open boundary
pub fn failure_diagnostic(err: &BatonError) -> String {
    format!("Stop hook error: {}\n", err)
}
