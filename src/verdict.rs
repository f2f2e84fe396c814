//! Verdict aggregation
//!
//! Folds the matcher's match sequence into a single reportable value.

use serde::Serialize;

use crate::matcher::RuleMatch;
use crate::rules::Severity;

/// One matched hazard, in rule declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Hazard level of the matched rule
    pub severity: Severity,

    /// The matched rule's explanation
    pub message: String,
}

/// The classifier's output: no hazard detected, or one or more hazards with
/// their severities and explanations.
///
/// A `Verdict` is a pure value created fresh per classification; the same
/// command against the same rule set always produces an identical verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "risk", rename_all = "lowercase")]
pub enum Verdict {
    /// No rule matched
    Clear,

    /// At least one rule matched
    Flagged {
        /// Matched hazards, preserved in rule declaration order
        /// (not severity order)
        matches: Vec<Finding>,

        /// Maximum severity among the matches, for threshold decisions
        highest: Severity,
    },
}

impl Verdict {
    /// Aggregate a match sequence into a verdict.
    ///
    /// Identical messages from distinct rules are kept; each rule's hazard
    /// is independently real.
    pub fn aggregate(matches: &[RuleMatch<'_>]) -> Verdict {
        if matches.is_empty() {
            return Verdict::Clear;
        }

        let mut findings = Vec::with_capacity(matches.len());
        let mut highest = Severity::Low;

        for m in matches {
            let severity = m.rule.severity();
            highest = highest.max(severity);
            findings.push(Finding {
                severity,
                message: m.rule.message().to_string(),
            });
        }

        Verdict::Flagged {
            matches: findings,
            highest,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, Verdict::Clear)
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, Verdict::Flagged { .. })
    }

    /// Maximum severity among the matches, if any rule matched
    pub fn highest(&self) -> Option<Severity> {
        match self {
            Verdict::Clear => None,
            Verdict::Flagged { highest, .. } => Some(*highest),
        }
    }

    /// The matched hazards (empty for `Clear`)
    pub fn findings(&self) -> &[Finding] {
        match self {
            Verdict::Clear => &[],
            Verdict::Flagged { matches, .. } => matches,
        }
    }
}
