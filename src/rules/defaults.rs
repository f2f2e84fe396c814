//! Built-in hazard rules
//!
//! The default rule table covers recursive deletion, privilege elevation,
//! direct device writes, and remote-execution pipes, plus a handful of
//! well-known destructive patterns. Declaration order is load-bearing:
//! multi-match verdicts report findings in this order.

use crate::rules::{MatchKind, Rule, Severity};

/// A built-in rule definition (static counterpart of [`Rule`])
#[derive(Debug, Clone, Copy)]
pub struct BuiltinRule {
    pub kind: MatchKind,
    pub severity: Severity,
    pub pattern: &'static str,
    pub message: &'static str,
}

impl BuiltinRule {
    const fn new(
        kind: MatchKind,
        severity: Severity,
        pattern: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            kind,
            severity,
            pattern,
            message,
        }
    }
}

impl From<&BuiltinRule> for Rule {
    fn from(builtin: &BuiltinRule) -> Self {
        Rule {
            pattern: builtin.pattern.to_string(),
            kind: builtin.kind,
            severity: builtin.severity,
            message: builtin.message.to_string(),
        }
    }
}

/// The default rule table, in reporting order
pub const BUILTIN_RULES: &[BuiltinRule] = &[
    // Privilege elevation
    BuiltinRule::new(
        MatchKind::Substring,
        Severity::Medium,
        "sudo",
        "Execution with root privileges",
    ),
    // Filesystem destruction
    BuiltinRule::new(
        MatchKind::Substring,
        Severity::High,
        "rm -rf",
        "Potential recursive file deletion",
    ),
    // Device writes
    BuiltinRule::new(
        MatchKind::Substring,
        Severity::Critical,
        "> /dev/",
        "Direct hardware/device write",
    ),
    // Remote code execution
    BuiltinRule::new(
        MatchKind::Regex,
        Severity::High,
        r"\b(curl|wget)\b.*\|\s*(ba|z)?sh\b",
        "Unsafe remote script execution",
    ),
    // Resource exhaustion
    BuiltinRule::new(
        MatchKind::Regex,
        Severity::Critical,
        r":\(\)\s*\{.*:\s*\|\s*:.*&",
        "Fork bomb detected",
    ),
    // Disk destruction
    BuiltinRule::new(
        MatchKind::Regex,
        Severity::Critical,
        r"\bdd\b.*\bof=/dev/(sd[a-z]|hd[a-z]|vd[a-z]|xvd[a-z]|nvme\d+)",
        "Writing directly to disk device",
    ),
    BuiltinRule::new(
        MatchKind::Regex,
        Severity::Critical,
        r"\bmkfs\.\w+\s+/dev/",
        "Formatting disk device",
    ),
    // Remote history rewrite
    BuiltinRule::new(
        MatchKind::Regex,
        Severity::Medium,
        r"\bgit\s+push\b.*(-f|--force)\b",
        "Force push rewrites remote history",
    ),
    // Permissions
    BuiltinRule::new(
        MatchKind::Regex,
        Severity::Medium,
        r"\bchmod\b.*\b777\b",
        "Setting world-writable permissions",
    ),
];
