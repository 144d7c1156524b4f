//! Structural validation of parsed objects against built-in schemas.
//!
//! Violation kinds: `not_dict` (the parsed value is not an object),
//! `missing_key`, and `type_error`. All violations in one file aggregate
//! into a single HIGH finding; files with no matching schema produce
//! nothing.

use crate::models::{Finding, Location, Severity};
use crate::rules::RuleContext;
use crate::schema::{JsonKind, Schema};
use serde_json::{json, Map, Value as Json};

pub const RULE_ID: &str = "schema_mismatch";

fn collect_violations(schema: &Schema, obj: &Json) -> Vec<Json> {
    let Some(map) = obj.as_object() else {
        return vec![json!({"kind": "not_dict", "actual": JsonKind::of(obj)})];
    };
    let mut violations = Vec::new();
    for field in &schema.required {
        match map.get(field.key) {
            None => violations.push(json!({"kind": "missing_key", "key": field.key})),
            Some(value) if !field.kind.matches(value) => violations.push(json!({
                "kind": "type_error",
                "key": field.key,
                "expected": field.kind.as_str(),
                "actual": JsonKind::of(value),
            })),
            Some(_) => {}
        }
    }
    violations
}

pub fn run(ctx: &RuleContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    for parsed in &ctx.bundle.parsed {
        let Some(schema) = ctx.schemas.for_path(&parsed.file_path) else {
            continue;
        };
        // Unparseable files are the invalid_yaml_json rule's concern.
        let Some(obj) = &parsed.obj else {
            continue;
        };
        let violations = collect_violations(schema, obj);
        if violations.is_empty() {
            continue;
        }
        let mut evidence = Map::new();
        evidence.insert("schema".into(), json!(schema.name));
        evidence.insert("violations".into(), Json::Array(violations.clone()));
        findings.push(Finding {
            rule_id: RULE_ID.into(),
            severity: Severity::High,
            location: Location::file(parsed.file_path.clone()),
            evidence,
            message: format!(
                "{} violates the '{}' schema ({} violation{})",
                parsed.file_path,
                schema.name,
                violations.len(),
                if violations.len() == 1 { "" } else { "s" }
            ),
            suggestion: format!(
                "Add the missing keys and fix value types required by '{}'.",
                schema.name
            ),
            autofix_allowed: false,
            confidence: 1.0,
        });
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::input::{ParsedObject, ScanBundle};
    use crate::schema::SchemaTable;

    fn run_on(parsed: Vec<ParsedObject>) -> Vec<Finding> {
        let bundle = ScanBundle {
            parsed,
            ..ScanBundle::default()
        };
        let schemas = SchemaTable::builtin();
        let ctx = RuleContext {
            bundle: &bundle,
            allow_roots: &[],
            thresholds: Thresholds::default(),
            schemas: &schemas,
        };
        run(&ctx)
    }

    #[test]
    fn test_missing_key_and_type_error_aggregate() {
        let findings = run_on(vec![ParsedObject {
            file_path: "flows/WORKFLOW.md".into(),
            obj: Some(json!({"name": 42})),
        }]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        let violations = findings[0].evidence["violations"].as_array().unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0]["kind"], "type_error");
        assert_eq!(violations[1]["kind"], "missing_key");
        assert_eq!(violations[1]["key"], "steps");
    }

    #[test]
    fn test_not_dict() {
        let findings = run_on(vec![ParsedObject {
            file_path: "WORKFLOW.md".into(),
            obj: Some(json!(["a", "b"])),
        }]);
        let violations = findings[0].evidence["violations"].as_array().unwrap();
        assert_eq!(violations[0]["kind"], "not_dict");
        assert_eq!(violations[0]["actual"], "array");
    }

    #[test]
    fn test_conforming_unmatched_and_null_objects_are_silent() {
        let findings = run_on(vec![
            ParsedObject {
                file_path: "WORKFLOW.md".into(),
                obj: Some(json!({"name": "deploy", "steps": ["build"]})),
            },
            ParsedObject {
                file_path: "README.md".into(),
                obj: Some(json!("free text")),
            },
            ParsedObject {
                file_path: "AGENTS.md".into(),
                obj: None,
            },
        ]);
        assert!(findings.is_empty());
    }
}
