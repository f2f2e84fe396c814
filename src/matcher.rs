//! Command scanning
//!
//! Evaluates a command string against every rule in a `RuleSet` and collects
//! the matches, in declaration order.

use crate::rules::{CompiledRule, RuleSet};

/// A single rule hit
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'rs> {
    /// Position of the matched rule in the `RuleSet`
    pub index: usize,

    /// The matched rule
    pub rule: &'rs CompiledRule,
}

/// Scan a command string against every rule in the set.
///
/// Matches are collected independently per rule and returned in declaration
/// order, regardless of where in the command each pattern occurs. Substring
/// rules are argument-unaware: a pattern inside a quoted string or command
/// substitution still matches. The empty command never matches anything.
///
/// Pure function of its inputs: no I/O, no shared state.
pub fn scan<'rs>(command: &str, rules: &'rs RuleSet) -> Vec<RuleMatch<'rs>> {
    if command.is_empty() {
        return Vec::new();
    }

    rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.is_match(command))
        .map(|(index, rule)| RuleMatch { index, rule })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MatchKind, Rule, Severity};

    fn rule(pattern: &str, kind: MatchKind, severity: Severity, message: &str) -> Rule {
        Rule {
            pattern: pattern.to_string(),
            kind,
            severity,
            message: message.to_string(),
        }
    }

    fn two_rule_set() -> RuleSet {
        RuleSet::compile(vec![
            rule("sudo", MatchKind::Substring, Severity::Medium, "root"),
            rule("rm -rf", MatchKind::Substring, Severity::High, "deletion"),
        ])
        .unwrap()
    }

    #[test]
    fn test_no_match() {
        let rules = two_rule_set();
        assert!(scan("ls -la", &rules).is_empty());
    }

    #[test]
    fn test_empty_command_never_matches() {
        let rules = two_rule_set();
        assert!(scan("", &rules).is_empty());

        // Even against a regex that would match the empty string
        let permissive = RuleSet::compile(vec![rule(
            ".*",
            MatchKind::Regex,
            Severity::Low,
            "anything",
        )])
        .unwrap();
        assert!(scan("", &permissive).is_empty());
    }

    #[test]
    fn test_all_matches_collected_in_rule_order() {
        let rules = two_rule_set();
        // "rm -rf" occurs before "sudo" in the string; rule order still wins
        let matches = scan("rm -rf / # via sudo later", &rules);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].index, 0);
        assert_eq!(matches[0].rule.message(), "root");
        assert_eq!(matches[1].index, 1);
    }

    #[test]
    fn test_rule_matching_twice_contributes_once() {
        let rules = two_rule_set();
        let matches = scan("sudo ls && sudo cat /etc/hosts", &rules);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].index, 0);
    }

    #[test]
    fn test_substring_match_inside_quoted_argument() {
        let rules = two_rule_set();
        let matches = scan("echo 'rm -rf is dangerous'", &rules);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule.severity(), Severity::High);
    }

    #[test]
    fn test_regex_rule_matches_anywhere() {
        let rules = RuleSet::compile(vec![rule(
            r"\bgit\s+push\b.*--force\b",
            MatchKind::Regex,
            Severity::Medium,
            "force push",
        )])
        .unwrap();

        assert_eq!(scan("cd repo && git push origin main --force", &rules).len(), 1);
        assert!(scan("git push origin main", &rules).is_empty());
    }

    #[test]
    fn test_scan_is_deterministic() {
        let rules = two_rule_set();
        let a: Vec<usize> = scan("sudo rm -rf /", &rules).iter().map(|m| m.index).collect();
        let b: Vec<usize> = scan("sudo rm -rf /", &rules).iter().map(|m| m.index).collect();
        assert_eq!(a, b);
    }
}
