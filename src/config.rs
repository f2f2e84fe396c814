//! Configuration loading for cmdaudit
//!
//! Supports TOML configuration with embedded defaults. Rules declared in a
//! config file replace the built-in set; a malformed rule fails the whole
//! load rather than being skipped.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::rules::{Rule, RuleSet};

/// A rule set failed to load
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("rule {index}: invalid regex pattern `{pattern}`: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule {index}: pattern must not be empty")]
    EmptyPattern { index: usize },
}

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some("~/.config/cmdaudit/audit.jsonl".to_string()),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    /// Hazard rules, in reporting order. Empty means the built-in set.
    pub rules: Vec<Rule>,
}

impl Config {
    /// Load configuration from the standard locations, or defaults if no
    /// config file exists. A file that exists but fails to read or parse is
    /// an error; falling back to defaults would silently drop operator rules.
    pub fn load() -> Result<Self, ConfigError> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("cmdaudit/config.toml")),
            Some(PathBuf::from("/etc/cmdaudit/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Config::default())
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Compile the configured rules into a `RuleSet` snapshot.
    /// With no rules configured, this is a copy of the built-in set.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        if self.rules.is_empty() {
            Ok(RuleSet::builtin().clone())
        } else {
            RuleSet::compile(self.rules.iter().cloned())
        }
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded), if audit logging is enabled
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general
            .audit_path
            .as_ref()
            .map(|p| Self::expand_path(p))
    }
}

/// Embedded default configuration, mirroring the built-in rule table
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = true
audit_path = "~/.config/cmdaudit/audit.jsonl"

[[rules]]
pattern = "sudo"
kind = "substring"
severity = "medium"
message = "Execution with root privileges"

[[rules]]
pattern = "rm -rf"
kind = "substring"
severity = "high"
message = "Potential recursive file deletion"

[[rules]]
pattern = "> /dev/"
kind = "substring"
severity = "critical"
message = "Direct hardware/device write"

[[rules]]
pattern = '\b(curl|wget)\b.*\|\s*(ba|z)?sh\b'
kind = "regex"
severity = "high"
message = "Unsafe remote script execution"

[[rules]]
pattern = ':\(\)\s*\{.*:\s*\|\s*:.*&'
kind = "regex"
severity = "critical"
message = "Fork bomb detected"

[[rules]]
pattern = '\bdd\b.*\bof=/dev/(sd[a-z]|hd[a-z]|vd[a-z]|xvd[a-z]|nvme\d+)'
kind = "regex"
severity = "critical"
message = "Writing directly to disk device"

[[rules]]
pattern = '\bmkfs\.\w+\s+/dev/'
kind = "regex"
severity = "critical"
message = "Formatting disk device"

[[rules]]
pattern = '\bgit\s+push\b.*(-f|--force)\b'
kind = "regex"
severity = "medium"
message = "Force push rewrites remote history"

[[rules]]
pattern = '\bchmod\b.*\b777\b'
kind = "regex"
severity = "medium"
message = "Setting world-writable permissions"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MatchKind, Severity};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.general.audit_log);
        assert!(config.rules.is_empty());
        assert_eq!(
            config.rule_set().unwrap().len(),
            RuleSet::builtin().len()
        );
    }

    #[test]
    fn test_parse_embedded_config() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.rules.len(), RuleSet::builtin().len());
        assert_eq!(config.rules[0].pattern, "sudo");
        assert_eq!(config.rules[0].kind, MatchKind::Substring);
        assert_eq!(config.rules[0].severity, Severity::Medium);

        // The embedded rules compile to the same set the binary ships with
        let compiled = config.rule_set().unwrap();
        for (embedded, builtin) in compiled.iter().zip(RuleSet::builtin().iter()) {
            assert_eq!(embedded.severity(), builtin.severity());
            assert_eq!(embedded.message(), builtin.message());
        }
    }

    #[test]
    fn test_custom_rules_replace_builtins() {
        let toml = r#"
            [[rules]]
            pattern = "forbidden"
            kind = "substring"
            severity = "low"
            message = "house rule"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let rules = config.rule_set().unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.get(0).unwrap().is_match("run forbidden thing"));
    }

    #[test]
    fn test_invalid_regex_fails_load() {
        let toml = r#"
            [[rules]]
            pattern = "(unclosed"
            kind = "regex"
            severity = "high"
            message = "bad"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let result = config.rule_set();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPattern { index: 0, .. })
        ));
    }

    #[test]
    fn test_missing_field_fails_parse() {
        let toml = r#"
            [[rules]]
            pattern = "sudo"
            kind = "substring"
        "#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [general]
            audit_log = false

            [[rules]]
            pattern = "drop table"
            kind = "substring"
            severity = "critical"
            message = "SQL table drop"
            "#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(!config.general.audit_log);
        assert!(config.audit_path().is_none());
        assert_eq!(config.rules.len(), 1);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = Config::load_from(Path::new("/nonexistent/cmdaudit.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_expand_path() {
        let expanded = Config::expand_path("~/.config/cmdaudit/audit.jsonl");
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
