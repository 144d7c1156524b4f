//! The six detection rules.
//!
//! Each rule is a pure function from the scan bundle (plus shared constant
//! tables) to a list of findings. Rules are mutually independent and share
//! no mutable state, so `run_rules` evaluates them with rayon; results are
//! concatenated in fixed rule order, which keeps the output byte-identical
//! across runs with identical inputs.

pub mod cycle_dependency;
pub mod dangerous_autofix;
pub mod dangling_reference;
pub mod invalid_parse;
pub mod path_escape;
pub mod schema_mismatch;

use crate::config::Thresholds;
use crate::input::ScanBundle;
use crate::models::Finding;
use crate::schema::SchemaTable;
use rayon::prelude::*;

/// Everything a rule may look at: the scan bundle and the immutable
/// constant tables resolved at startup.
pub struct RuleContext<'a> {
    pub bundle: &'a ScanBundle,
    pub allow_roots: &'a [String],
    pub thresholds: Thresholds,
    pub schemas: &'a SchemaTable,
}

type RuleFn = fn(&RuleContext) -> Vec<Finding>;

/// Fixed evaluation order. Order only affects output grouping, never the
/// findings themselves.
const RULES: [RuleFn; 6] = [
    invalid_parse::run,
    schema_mismatch::run,
    dangling_reference::run,
    cycle_dependency::run,
    path_escape::run,
    dangerous_autofix::run,
];

/// Evaluate every rule against the bundle.
pub fn run_rules(ctx: &RuleContext) -> Vec<Finding> {
    RULES
        .par_iter()
        .map(|rule| rule(ctx))
        .collect::<Vec<Vec<Finding>>>()
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::edge::Edge;

    fn bundle_with_cycle_and_dangling() -> ScanBundle {
        let edge = |src: &str, dst: &str, kind: &str, conf: f64| Edge {
            src_file: src.into(),
            dst_file: dst.into(),
            edge_type: kind.into(),
            raw_target: dst.into(),
            confidence: conf,
            line_range: Some((1, 1)),
            snippet: None,
        };
        ScanBundle {
            edges: vec![
                edge("a.md", "b.md", "import", 0.9),
                edge("b.md", "a.md", "import", 0.9),
                edge("a.md", "missing.md", "markdown_link", 0.8),
            ],
            files: vec!["a.md".into(), "b.md".into()],
            ..ScanBundle::default()
        }
    }

    #[test]
    fn test_run_rules_is_idempotent() {
        let bundle = bundle_with_cycle_and_dangling();
        let schemas = SchemaTable::builtin();
        let ctx = RuleContext {
            bundle: &bundle,
            allow_roots: &[],
            thresholds: Thresholds::default(),
            schemas: &schemas,
        };
        let first = run_rules(&ctx);
        let second = run_rules(&ctx);
        assert!(!first.is_empty());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_rule_order_groups_output() {
        let bundle = bundle_with_cycle_and_dangling();
        let schemas = SchemaTable::builtin();
        let ctx = RuleContext {
            bundle: &bundle,
            allow_roots: &[],
            thresholds: Thresholds::default(),
            schemas: &schemas,
        };
        let ids: Vec<String> = run_rules(&ctx).iter().map(|f| f.rule_id.clone()).collect();
        assert_eq!(ids, vec!["dangling_reference", "cycle_dependency"]);
    }
}
