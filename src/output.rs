//! Verdict rendering
//!
//! Presentation of verdicts is separate from the classification decision.
//! The text format is the stable process-boundary convention: matched
//! messages joined with `" | "`, and the exact literal `Risk Level: LOW`
//! for a clear verdict. Structured consumers use the JSON report instead.

use serde::Serialize;

use crate::rules::Severity;
use crate::verdict::{Finding, Verdict};

/// Fixed literal rendered for a clear verdict. Existing callers match on
/// this exact string; do not change it.
pub const CLEAR_TEXT: &str = "Risk Level: LOW";

/// Separator between rendered findings
pub const SEPARATOR: &str = " | ";

/// Render a verdict as the conventional one-line report
pub fn render_text(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Clear => CLEAR_TEXT.to_string(),
        Verdict::Flagged { matches, .. } => matches
            .iter()
            .map(|f| format!("{}: {}", f.severity, f.message))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    }
}

/// Structured report for JSON output
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// The audited command string
    pub command: &'a str,

    /// Whether any rule matched
    pub flagged: bool,

    /// Maximum severity among the findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest: Option<Severity>,

    /// Matched hazards, in rule declaration order
    pub findings: &'a [Finding],
}

impl<'a> Report<'a> {
    /// Build a report for a command and its verdict
    pub fn new(command: &'a str, verdict: &'a Verdict) -> Self {
        Self {
            command,
            flagged: verdict.is_flagged(),
            highest: verdict.highest(),
            findings: verdict.findings(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
