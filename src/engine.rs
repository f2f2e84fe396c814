//! The risk classification engine
//!
//! Owns a compiled `RuleSet` snapshot and classifies command strings
//! against it.

use crate::config::{Config, ConfigError};
use crate::matcher;
use crate::rules::RuleSet;
use crate::verdict::Verdict;

/// Stateless classifier over an immutable rule set.
///
/// The engine holds no mutable state, so a single instance can serve
/// concurrent classifications without coordination. To pick up new rules,
/// build a new engine; an in-flight classification keeps its snapshot.
#[derive(Debug)]
pub struct RiskEngine {
    rules: RuleSet,
}

impl RiskEngine {
    /// Create an engine from configuration, compiling its rules.
    ///
    /// Fails with `ConfigError` if any configured pattern is malformed;
    /// rule errors surface here, never at classification time.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: config.rule_set()?,
        })
    }

    /// Create an engine over the built-in rule set
    pub fn builtin() -> Self {
        Self {
            rules: RuleSet::builtin().clone(),
        }
    }

    /// Create an engine over an already-compiled rule set
    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Classify a command string.
    ///
    /// Never fails: absence of risk is a value (`Clear`), not an error.
    pub fn classify(&self, command: &str) -> Verdict {
        let matches = matcher::scan(command, &self.rules);
        Verdict::aggregate(&matches)
    }

    /// The rule set this engine classifies against
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
