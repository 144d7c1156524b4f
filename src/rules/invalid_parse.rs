//! Scanner-supplied parse failures surfaced as findings.
//!
//! Files the scanner could not parse are reported under the dedicated
//! `invalid_yaml_json` rule id. The verification engine treats any
//! post-repair finding with this id as an unconditional blocker.

use crate::models::{Finding, Location, Severity};
use crate::rules::RuleContext;
use serde_json::{json, Map};

pub const RULE_ID: &str = "invalid_yaml_json";

pub fn run(ctx: &RuleContext) -> Vec<Finding> {
    ctx.bundle
        .parse_errors
        .iter()
        .map(|pe| {
            let mut evidence = Map::new();
            evidence.insert("error".into(), json!(pe.msg));
            if let Some(snippet) = &pe.snippet {
                evidence.insert("snippet".into(), json!(snippet));
            }
            Finding {
                rule_id: RULE_ID.into(),
                severity: Severity::High,
                location: Location {
                    file: pe.path.clone(),
                    line: pe.line,
                    line_range: None,
                },
                evidence,
                message: format!("File could not be parsed: {}", pe.msg),
                suggestion: "Fix the syntax error before any automated repair.".into(),
                autofix_allowed: false,
                confidence: 1.0,
            }
        })
        .collect()
}
