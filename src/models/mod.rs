//! Shared data models for findings, verification results, and scan inputs.

pub mod edge;
pub mod verify;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Finding severity. The LOW < MEDIUM < HIGH order is load-bearing:
/// regression detection and CI gating compare severities, so the ranking
/// is encoded explicitly rather than relying on declaration order.
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn rank(self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Where a finding points. Pure value, no identity beyond its fields.
pub struct Location {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_range: Option<(u32, u32)>,
}

impl Location {
    pub fn file(file: impl Into<String>) -> Self {
        Location {
            file: file.into(),
            line: None,
            line_range: None,
        }
    }

    pub fn at(file: impl Into<String>, line: u32) -> Self {
        Location {
            file: file.into(),
            line: Some(line),
            line_range: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A single reported defect. Created fresh on every scan pass and never
/// mutated; persistence is an external concern.
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub location: Location,
    #[serde(default)]
    pub evidence: Map<String, Json>,
    pub message: String,
    #[serde(default)]
    pub suggestion: String,
    pub autofix_allowed: bool,
    pub confidence: f64,
}

impl Finding {
    /// Identity used when diffing findings across scans. Two findings with
    /// equal `(rule_id, file, line)` are the same finding even when their
    /// evidence or message differ.
    pub fn identity_key(&self) -> String {
        match self.location.line {
            Some(line) => format!("{}:{}:{}", self.rule_id, self.location.file, line),
            None => format!("{}:{}:-", self.rule_id, self.location.file),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A file whose content could not be parsed into a structured object.
/// Supplied by the external scanner; the rule engine turns each into a
/// HIGH `invalid_yaml_json` finding.
pub struct ParseError {
    pub path: String,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Aggregated scan summary used by printers.
pub struct Summary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub files: usize,
}

impl Summary {
    pub fn tally(findings: &[Finding]) -> Self {
        let mut s = Summary::default();
        let mut files: Vec<&str> = findings.iter().map(|f| f.location.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        s.files = files.len();
        for f in findings {
            match f.severity {
                Severity::High => s.high += 1,
                Severity::Medium => s.medium += 1,
                Severity::Low => s.low += 1,
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order_is_explicit() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert_eq!(Severity::High.rank(), 2);
        assert_eq!(Severity::High.max(Severity::Low), Severity::High);
    }

    #[test]
    fn test_identity_key_ignores_message() {
        let mut a = Finding {
            rule_id: "dangling_reference".into(),
            severity: Severity::Medium,
            location: Location::at("docs/a.md", 12),
            evidence: Map::new(),
            message: "first".into(),
            suggestion: String::new(),
            autofix_allowed: false,
            confidence: 0.8,
        };
        let key = a.identity_key();
        a.message = "second".into();
        assert_eq!(key, a.identity_key());
        assert_eq!(key, "dangling_reference:docs/a.md:12");
        a.location.line = None;
        assert_eq!(a.identity_key(), "dangling_reference:docs/a.md:-");
    }

    #[test]
    fn test_summary_counts_by_severity_and_file() {
        let f = |sev, file: &str| Finding {
            rule_id: "r".into(),
            severity: sev,
            location: Location::file(file),
            evidence: Map::new(),
            message: String::new(),
            suggestion: String::new(),
            autofix_allowed: false,
            confidence: 1.0,
        };
        let findings = vec![
            f(Severity::High, "a.md"),
            f(Severity::High, "a.md"),
            f(Severity::Low, "b.md"),
        ];
        let s = Summary::tally(&findings);
        assert_eq!(s.high, 2);
        assert_eq!(s.low, 1);
        assert_eq!(s.files, 2);
    }
}
