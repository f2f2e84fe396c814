//! Hazard rules for cmdaudit
//!
//! Defines the rule data model (pattern, match kind, severity, message) and
//! the ordered, immutable `RuleSet` the matcher evaluates against.

pub mod defaults;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ConfigError;

/// Ordered hazard level. Declaration order is the severity order, so the
/// derived `Ord` gives `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    /// Uppercase name as used in rendered reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule's pattern text is interpreted against the command string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Pattern matches if it occurs anywhere in the command (no tokenization)
    Substring,

    /// Pattern is a regular expression, matched anywhere in the command
    Regex,
}

/// A hazard rule as declared in configuration or the built-in table.
///
/// A rule carries no identifier of its own; its identity is its position in
/// the `RuleSet`, which also fixes its position in multi-match output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rule {
    /// Pattern text, interpreted per `kind`
    pub pattern: String,

    /// Matching strategy for `pattern`
    pub kind: MatchKind,

    /// Hazard level reported when this rule matches
    pub severity: Severity,

    /// Human-readable explanation of the hazard
    pub message: String,
}

/// A rule with its pattern pre-compiled for matching
#[derive(Debug, Clone)]
pub struct CompiledRule {
    matcher: PatternMatcher,
    severity: Severity,
    message: String,
}

#[derive(Debug, Clone)]
enum PatternMatcher {
    Substring(String),
    Regex(Regex),
}

impl CompiledRule {
    /// Check whether this rule matches anywhere in the command string.
    /// A rule matching at several positions still counts as one match.
    pub fn is_match(&self, command: &str) -> bool {
        match &self.matcher {
            PatternMatcher::Substring(pattern) => command.contains(pattern.as_str()),
            PatternMatcher::Regex(regex) => regex.is_match(command),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered, immutable collection of compiled hazard rules.
///
/// Insertion order is preserved and observable: multi-match verdicts report
/// findings in this order. A `RuleSet` is never mutated after construction;
/// reloading configuration means compiling a fresh `RuleSet` and handing it
/// to a new engine, so in-flight classifications keep their snapshot.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile an ordered sequence of rules, validating every pattern.
    ///
    /// Fails on the first empty pattern or unparsable regex. A malformed
    /// rule fails the whole load; silently skipping it would leave the
    /// hazard undetected.
    pub fn compile<I>(rules: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut compiled = Vec::new();

        for (index, rule) in rules.into_iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(ConfigError::EmptyPattern { index });
            }

            let matcher = match rule.kind {
                MatchKind::Substring => PatternMatcher::Substring(rule.pattern),
                MatchKind::Regex => match Regex::new(&rule.pattern) {
                    Ok(regex) => PatternMatcher::Regex(regex),
                    Err(source) => {
                        return Err(ConfigError::InvalidPattern {
                            index,
                            pattern: rule.pattern,
                            source,
                        })
                    }
                },
            };

            compiled.push(CompiledRule {
                matcher,
                severity: rule.severity,
                message: rule.message,
            });
        }

        Ok(Self { rules: compiled })
    }

    /// The fixed built-in rule set, compiled once
    pub fn builtin() -> &'static RuleSet {
        static BUILTIN: Lazy<RuleSet> = Lazy::new(|| {
            RuleSet::compile(defaults::BUILTIN_RULES.iter().map(Rule::from))
                .expect("built-in rule table compiles")
        });
        &BUILTIN
    }

    /// Iterate rules in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    pub fn get(&self, index: usize) -> Option<&CompiledRule> {
        self.rules.get(index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
