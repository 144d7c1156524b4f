//! Risk scoring for automated repair proposals.
//!
//! Three predicates feed a weighted score: touching paths outside the
//! allowed roots (3), destructive ops (2), and sheer change volume (1).
//! Any non-zero score produces a finding; a score of 3 or more is HIGH.
//! These findings are never auto-fixable.

use crate::models::{Finding, Location, Severity};
use crate::rules::RuleContext;
use crate::utils;
use serde_json::{json, Map};

pub const RULE_ID: &str = "dangerous_autofix";

/// Ops that delete or displace content.
const RISKY_OPS: [&str; 4] = ["delete", "move", "rename", "remove"];

/// Change-volume bounds beyond which a proposal counts as big.
const BIG_CHANGE_LINES: usize = 50;
const BIG_CHANGE_FILES: usize = 5;

pub fn run(ctx: &RuleContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    for proposal in &ctx.bundle.proposals {
        let out_of_scope: Vec<&String> = proposal
            .touched_paths
            .iter()
            .filter(|p| !ctx.allow_roots.iter().any(|r| utils::is_contained(p, r)))
            .collect();
        let risky_ops: Vec<&String> = proposal
            .ops
            .iter()
            .filter(|op| RISKY_OPS.contains(&op.to_lowercase().as_str()))
            .collect();
        let big_change = proposal.changed_lines > BIG_CHANGE_LINES
            || proposal.changed_files > BIG_CHANGE_FILES;

        let risk_score = 3 * usize::from(!out_of_scope.is_empty())
            + 2 * usize::from(!risky_ops.is_empty())
            + usize::from(big_change);
        if risk_score == 0 {
            continue;
        }

        let severity = if risk_score >= 3 {
            Severity::High
        } else {
            Severity::Medium
        };
        let mut evidence = Map::new();
        evidence.insert("proposal_id".into(), json!(proposal.id));
        evidence.insert("risk_score".into(), json!(risk_score));
        evidence.insert("out_of_scope_paths".into(), json!(out_of_scope));
        evidence.insert("risky_ops".into(), json!(risky_ops));
        evidence.insert("changed_lines".into(), json!(proposal.changed_lines));
        evidence.insert("changed_files".into(), json!(proposal.changed_files));
        findings.push(Finding {
            rule_id: RULE_ID.into(),
            severity,
            location: Location::file(proposal.target_file.clone()),
            evidence,
            message: format!(
                "Proposal '{}' is risky to auto-apply (score {})",
                proposal.id, risk_score
            ),
            suggestion: "Review this proposal manually before applying.".into(),
            autofix_allowed: false,
            confidence: 1.0,
        });
    }
    findings
}
