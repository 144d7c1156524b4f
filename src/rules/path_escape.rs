//! Detection of references that leave the workspace root.
//!
//! Absolute, home-relative, UNC, and drive-letter targets are classified
//! as escapes without resolution. Everything else is resolved lexically
//! against the source file's directory; a `..` that climbs above the
//! workspace root is an escape. Escapes are never auto-fixable.

use crate::models::{Finding, Location, Severity};
use crate::rules::RuleContext;
use crate::utils;
use serde_json::{json, Map};
use std::path::Path;

pub const RULE_ID: &str = "path_escape";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeStatus {
    Ok,
    Escape,
    Invalid,
}

/// Classify one raw reference target relative to its source file.
pub fn classify_target(src_file: &str, raw_target: &str) -> EscapeStatus {
    if raw_target.is_empty() || raw_target.contains('\0') {
        return EscapeStatus::Invalid;
    }
    if is_non_workspace_form(raw_target) {
        return EscapeStatus::Escape;
    }
    let rel = utils::parent_dir(src_file).join(raw_target.replace('\\', "/"));
    match utils::resolve_within(&rel) {
        Some(_) => EscapeStatus::Ok,
        None => EscapeStatus::Escape,
    }
}

/// Raw string forms that can never live inside the workspace: absolute
/// POSIX paths, `~`, UNC shares, and drive-letter paths (`X:` or `X:\`).
fn is_non_workspace_form(raw: &str) -> bool {
    if raw.starts_with('/') || raw.starts_with('~') || raw.starts_with("\\\\") {
        return true;
    }
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

pub fn run(ctx: &RuleContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    for edge in &ctx.bundle.edges {
        if classify_target(&edge.src_file, &edge.raw_target) != EscapeStatus::Escape {
            continue;
        }
        let mut evidence = Map::new();
        evidence.insert("raw_target".into(), json!(edge.raw_target));
        evidence.insert("edge_type".into(), json!(edge.edge_type));
        if let Some(snippet) = &edge.snippet {
            evidence.insert("snippet".into(), json!(snippet));
        }
        findings.push(Finding {
            rule_id: RULE_ID.into(),
            severity: Severity::High,
            location: Location {
                file: edge.src_file.clone(),
                line: edge.line(),
                line_range: edge.line_range,
            },
            evidence,
            message: format!(
                "Reference '{}' resolves outside the workspace root",
                edge.raw_target
            ),
            suggestion: "Point the reference at a path inside the workspace.".into(),
            // Safety policy: path escapes always need a human.
            autofix_allowed: false,
            confidence: 1.0,
        });
    }
    findings
}

/// Resolved in-root form of a target, for callers that render suggestions.
pub fn resolved_display(src_file: &str, raw_target: &str) -> Option<String> {
    let rel = utils::parent_dir(src_file).join(raw_target.replace('\\', "/"));
    utils::resolve_within(Path::new(&rel)).map(|parts| parts.join("/"))
}
