//! Pre/post repair verification.
//!
//! Compares the finding sets from the scans before and after an automated
//! repair and decides whether the repair qualified. Disqualifying
//! conditions are checked in a strict order: a parse error always loses,
//! an out-of-scope edit is rejected before regressions are even
//! considered, and only then does a severe new finding reject the run.
//! Every reason is a normal return value; nothing here is fatal.

use crate::config::Thresholds;
use crate::input::AppliedPatches;
use crate::models::verify::{
    Digest, VerifyResult, REASON_PARSE_ERROR, REASON_REGRESSION, REASON_SCOPE_VIOLATION,
};
use crate::models::Finding;
use crate::rules::invalid_parse;
use std::collections::BTreeSet;

/// Decide whether a repair attempt succeeded.
///
/// `resolved` is the plain identity-key set difference between pre and
/// post, deliberately not filtered to `target_finding_ids`: every key that
/// disappeared is reported, whatever its rule. A finding whose line number
/// shifted therefore counts as resolved under its old key; see DESIGN.md.
pub fn verify_after_execute(
    pre_findings: &[Finding],
    post_findings: &[Finding],
    _target_finding_ids: &[String],
    applied_patches: &AppliedPatches,
    thresholds: &Thresholds,
) -> VerifyResult {
    let pre_keys: BTreeSet<String> = pre_findings.iter().map(Finding::identity_key).collect();
    let post_keys: BTreeSet<String> = post_findings.iter().map(Finding::identity_key).collect();

    let resolved: Vec<String> = pre_keys.difference(&post_keys).cloned().collect();
    let regressed: Vec<Finding> = post_findings
        .iter()
        .filter(|f| {
            !pre_keys.contains(&f.identity_key())
                && f.severity >= thresholds.regression_severity
        })
        .cloned()
        .collect();

    if post_findings
        .iter()
        .any(|f| f.rule_id == invalid_parse::RULE_ID)
    {
        return VerifyResult {
            ok: false,
            reason: Some(REASON_PARSE_ERROR.into()),
            resolved,
            regressed,
            post_digest: None,
        };
    }
    if applied_patches.has_out_of_scope_changes {
        return VerifyResult {
            ok: false,
            reason: Some(REASON_SCOPE_VIOLATION.into()),
            resolved,
            regressed,
            post_digest: None,
        };
    }
    if !regressed.is_empty() {
        return VerifyResult {
            ok: false,
            reason: Some(REASON_REGRESSION.into()),
            resolved,
            regressed,
            post_digest: None,
        };
    }
    VerifyResult {
        ok: true,
        reason: None,
        resolved,
        regressed,
        post_digest: Some(Digest::of(post_findings)),
    }
}
