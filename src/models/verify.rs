//! Verification-result models returned by `verify::verify_after_execute`.

use crate::models::Finding;
use serde::Serialize;
use std::collections::BTreeMap;

/// Disqualification reasons, in the order they are checked. Each is a
/// normal expected return value, never a thrown error.
pub const REASON_PARSE_ERROR: &str = "parse_error";
pub const REASON_SCOPE_VIOLATION: &str = "scope_violation";
pub const REASON_REGRESSION: &str = "regression";

#[derive(Debug, Clone, Serialize)]
/// Outcome of one pre/post verification pass. Purely a return value,
/// never a long-lived entity.
pub struct VerifyResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Identity keys present before the repair and absent after it.
    pub resolved: Vec<String>,
    /// New findings at or above the regression severity floor.
    pub regressed: Vec<Finding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_digest: Option<Digest>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Post-repair finding counts attached to a successful verification.
pub struct Digest {
    pub total: usize,
    pub by_severity: BTreeMap<String, usize>,
    pub by_rule: BTreeMap<String, usize>,
}

impl Digest {
    pub fn of(findings: &[Finding]) -> Self {
        let mut d = Digest {
            total: findings.len(),
            ..Digest::default()
        };
        for f in findings {
            *d.by_severity
                .entry(f.severity.as_str().to_string())
                .or_insert(0) += 1;
            *d.by_rule.entry(f.rule_id.clone()).or_insert(0) += 1;
        }
        d
    }
}
