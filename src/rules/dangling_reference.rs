//! Detection of references whose destination does not exist.
//!
//! Paths are compared after lower-casing and forward-slash normalization,
//! so a case-only mismatch is not dangling. On a miss, up to three similar
//! inventory paths are suggested, highest priority first: exact
//! case-insensitive filename match, same stem with a different extension,
//! then substring containment between stems.

use crate::classify::detect_reference_type;
use crate::confidence::score_edge_kind;
use crate::models::{Finding, Location, Severity};
use crate::rules::RuleContext;
use crate::utils::{extension, filename, normalize_for_match, parent_dir, stem};
use serde_json::{json, Map};
use std::collections::BTreeSet;
use std::path::Path;

pub const RULE_ID: &str = "dangling_reference";

/// Similar inventory paths for a missing destination, best first, capped
/// at three.
pub fn similar_candidates(dst: &str, existing_files: &[String]) -> Vec<String> {
    let target = normalize_for_match(dst);
    let target_name = filename(&target).to_string();
    let target_stem = stem(&target_name).to_string();

    let mut by_filename: Vec<String> = Vec::new();
    let mut by_stem: Vec<String> = Vec::new();
    let mut by_substring: Vec<String> = Vec::new();
    for file in existing_files {
        let norm = normalize_for_match(file);
        let name = filename(&norm);
        let s = stem(name);
        if name == target_name {
            by_filename.push(file.clone());
        } else if s == target_stem {
            by_stem.push(file.clone());
        } else if !s.is_empty()
            && !target_stem.is_empty()
            && (s.contains(target_stem.as_str()) || target_stem.contains(s))
        {
            by_substring.push(file.clone());
        }
    }
    by_filename
        .into_iter()
        .chain(by_stem)
        .chain(by_substring)
        .take(3)
        .collect()
}

pub fn run(ctx: &RuleContext) -> Vec<Finding> {
    let existing: BTreeSet<String> = ctx
        .bundle
        .files
        .iter()
        .map(|f| normalize_for_match(f))
        .collect();

    let mut findings = Vec::new();
    for edge in &ctx.bundle.edges {
        if existing.contains(&normalize_for_match(&edge.dst_file)) {
            continue;
        }
        let similar = similar_candidates(&edge.dst_file, &ctx.bundle.files);
        let high = ctx.thresholds.is_high_confidence(edge.confidence);
        let severity = if high { Severity::High } else { Severity::Medium };
        // Auto-fix only when the replacement is unambiguous and the edge
        // itself is trustworthy.
        let autofix_allowed = similar.len() == 1 && high;
        let suggestion = match similar.first() {
            Some(best) => {
                let rel = pathdiff::diff_paths(Path::new(best), parent_dir(&edge.src_file))
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_else(|| best.clone());
                format!("Did you mean '{rel}'?")
            }
            None => "Remove the reference or create the missing file.".into(),
        };
        let mut evidence = Map::new();
        evidence.insert("raw_target".into(), json!(edge.raw_target));
        evidence.insert("dst_file".into(), json!(edge.dst_file));
        evidence.insert("edge_type".into(), json!(edge.edge_type));
        evidence.insert("similar_files".into(), json!(similar));
        // Corroborate the scanner's label from the recorded snippet and
        // score the best candidate as a replacement target.
        let kind = match &edge.snippet {
            Some(snippet) => detect_reference_type(snippet, &edge.raw_target)
                .as_str()
                .to_string(),
            None => edge.edge_type.clone(),
        };
        if kind != edge.edge_type {
            evidence.insert("detected_type".into(), json!(kind));
        }
        if let Some(best) = similar.first() {
            let case_match = filename(best) == filename(&edge.dst_file);
            let ext_match = extension(best).eq_ignore_ascii_case(extension(&edge.dst_file));
            evidence.insert(
                "suggestion_confidence".into(),
                json!(score_edge_kind(&kind, true, case_match, ext_match)),
            );
        }
        findings.push(Finding {
            rule_id: RULE_ID.into(),
            severity,
            location: Location {
                file: edge.src_file.clone(),
                line: edge.line(),
                line_range: edge.line_range,
            },
            evidence,
            message: format!("Reference to '{}' does not resolve", edge.dst_file),
            suggestion,
            autofix_allowed,
            confidence: edge.confidence,
        });
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::input::ScanBundle;
    use crate::models::edge::Edge;
    use crate::schema::SchemaTable;

    fn edge(src: &str, dst: &str, conf: f64) -> Edge {
        Edge {
            src_file: src.into(),
            dst_file: dst.into(),
            edge_type: "markdown_link".into(),
            raw_target: dst.into(),
            confidence: conf,
            line_range: Some((5, 5)),
            snippet: None,
        }
    }

    fn run_on(edges: Vec<Edge>, files: &[&str]) -> Vec<Finding> {
        let bundle = ScanBundle {
            edges,
            files: files.iter().map(|s| s.to_string()).collect(),
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
    fn test_case_mismatch_is_not_dangling() {
        assert!(run_on(vec![edge("x.md", "A.MD", 0.8)], &["A.md", "a.md"]).is_empty());
    }

    #[test]
    fn test_miss_with_no_similar_files() {
        let findings = run_on(vec![edge("x.md", "B.md", 0.8)], &["A.md", "a.md"]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(
            findings[0].evidence["similar_files"],
            serde_json::json!([])
        );
        assert!(!findings[0].autofix_allowed);
    }

    #[test]
    fn test_low_confidence_edge_is_medium() {
        let findings = run_on(vec![edge("x.md", "B.md", 0.4)], &["A.md"]);
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[test]
    fn test_candidate_priority_and_cap() {
        let files = vec![
            "a/guide.txt".to_string(),   // same stem, different extension
            "b/guide.md".to_string(),    // exact filename match
            "c/guidebook.md".to_string(), // stem substring
            "d/guide.rst".to_string(),   // same stem, different extension
        ];
        let similar = similar_candidates("docs/guide.md", &files);
        assert_eq!(similar, vec!["b/guide.md", "a/guide.txt", "d/guide.rst"]);
    }

    #[test]
    fn test_unique_high_confidence_candidate_is_autofixable() {
        let findings = run_on(vec![edge("docs/x.md", "docs/guide.md", 0.8)], &["docs/x.md", "guide.md"]);
        assert!(findings[0].autofix_allowed);
        assert_eq!(findings[0].suggestion, "Did you mean '../guide.md'?");
    }

    #[test]
    fn test_suggestion_is_scored_and_snippet_reclassified() {
        let mut e = edge("docs/x.md", "docs/guide.md", 0.8);
        e.snippet = Some("see [guide](guide.md)".into());
        e.raw_target = "guide.md".into();
        let findings = run_on(vec![e], &["docs/x.md", "guide.md"]);
        // markdown_link base 0.8, all corroboration signals clean.
        assert_eq!(findings[0].evidence["suggestion_confidence"], 0.8);
        assert!(findings[0].evidence.get("detected_type").is_none());
    }

    #[test]
    fn test_ambiguous_candidates_never_autofix() {
        let findings = run_on(
            vec![edge("x.md", "guide.md", 0.9)],
            &["a/guide.md", "b/guide.md"],
        );
        assert_eq!(findings[0].severity, Severity::High);
        assert!(!findings[0].autofix_allowed);
    }
}
