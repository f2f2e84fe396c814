//! cmdaudit - Risk classification engine for shell commands
//!
//! This library classifies a raw command string against an ordered set of
//! hazard rules and returns a verdict: clear, or flagged with the matched
//! hazards and the highest severity among them. It never executes the
//! audited command; whether to block, warn, or allow is the caller's call.
//!
//! # Features
//!
//! - **Ordered rule sets**: substring and regex rules, matched in
//!   declaration order
//! - **Typed severities**: `LOW < MEDIUM < HIGH < CRITICAL`, usable for
//!   threshold decisions
//! - **Configurable rules**: TOML rule files replace the built-in set;
//!   malformed patterns fail the load instead of being skipped
//! - **Audit logging**: JSONL log of classification decisions
//!
//! # Example
//!
//! ```
//! use cmdaudit::{RiskEngine, Severity};
//!
//! let engine = RiskEngine::builtin();
//!
//! let verdict = engine.classify("sudo rm -rf /");
//! assert!(verdict.is_flagged());
//! assert_eq!(verdict.highest(), Some(Severity::High));
//!
//! assert!(engine.classify("ls -la").is_clear());
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod output;
pub mod rules;
pub mod verdict;

// Re-exports for convenience
pub use config::{Config, ConfigError};
pub use engine::RiskEngine;
pub use rules::{MatchKind, Rule, RuleSet, Severity};
pub use verdict::{Finding, Verdict};
