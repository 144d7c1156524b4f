//! Reporting of reference-graph cycles.
//!
//! Cycles through structural edge types (import/extends/include) are HIGH;
//! anything else is MEDIUM. A cycle's confidence is the minimum among its
//! edges. Cutting a cycle requires judgment about which edge to remove,
//! so these findings are never auto-fixable.

use crate::confidence::round2;
use crate::graph::{build_graph, find_cycles};
use crate::models::{Finding, Location, Severity};
use crate::rules::RuleContext;
use serde_json::{json, Map};

pub const RULE_ID: &str = "cycle_dependency";

/// Edge types that make a cycle structurally binding.
const STRUCTURAL_EDGE_TYPES: [&str; 3] = ["import", "extends", "include"];

pub fn run(ctx: &RuleContext) -> Vec<Finding> {
    let graph = build_graph(&ctx.bundle.edges);
    find_cycles(&graph)
        .into_iter()
        .map(|cycle| {
            let severity = if cycle.has_edge_type(&STRUCTURAL_EDGE_TYPES) {
                Severity::High
            } else {
                Severity::Medium
            };
            let path = cycle.path_string();
            let mut evidence = Map::new();
            evidence.insert("cycle".into(), json!(path));
            evidence.insert("length".into(), json!(cycle.nodes.len()));
            evidence.insert(
                "edge_types".into(),
                json!(cycle
                    .edges
                    .iter()
                    .map(|e| e.edge_type.as_str())
                    .collect::<Vec<_>>()),
            );
            let entry = cycle.nodes.first().cloned().unwrap_or_default();
            let line = cycle.edges.first().and_then(|e| e.line());
            Finding {
                rule_id: RULE_ID.into(),
                severity,
                location: Location {
                    file: entry,
                    line,
                    line_range: None,
                },
                evidence,
                message: format!("Circular reference: {path}"),
                suggestion: "Break the cycle by removing or inverting one of its edges.".into(),
                autofix_allowed: false,
                confidence: round2(cycle.min_confidence()),
            }
        })
        .collect()
}
