//! JSONL audit logging for cmdaudit
//!
//! Records classification decisions to a JSONL file for later analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::rules::Severity;
use crate::verdict::Verdict;

/// Commands longer than this are truncated in the log
const MAX_COMMAND_CHARS: usize = 100;

/// Classification outcome as recorded in the log
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Clear,
    Flagged,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the classification
    pub timestamp: DateTime<Utc>,

    /// CLEAR or FLAGGED
    pub outcome: Outcome,

    /// The audited command (truncated)
    pub command: String,

    /// Maximum severity among the matches (flagged only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest: Option<Severity>,

    /// Messages of the matched rules, in rule order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<String>,
}

impl AuditEntry {
    /// Create an audit entry from a command and its verdict
    pub fn new(command: &str, verdict: &Verdict) -> Self {
        let outcome = if verdict.is_flagged() {
            Outcome::Flagged
        } else {
            Outcome::Clear
        };

        Self {
            timestamp: Utc::now(),
            outcome,
            command: truncate(command),
            highest: verdict.highest(),
            matches: verdict
                .findings()
                .iter()
                .map(|f| f.message.clone())
                .collect(),
        }
    }
}

/// Truncate on a char boundary to keep log lines bounded
fn truncate(command: &str) -> String {
    match command.char_indices().nth(MAX_COMMAND_CHARS) {
        Some((idx, _)) => format!("{}...", &command[..idx]),
        None => command.to_string(),
    }
}

/// Audit logger appending JSONL entries
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger. With no path, logging is a no-op.
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a classification decision
    pub fn log_verdict(&mut self, command: &str, verdict: &Verdict) -> Result<(), std::io::Error> {
        let entry = AuditEntry::new(command, verdict);
        self.log(&entry)
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self { writer: None }
    }
}
