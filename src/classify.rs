//! Heuristic classification of raw reference occurrences.
//!
//! The pattern tests run in a designed precedence and return on first
//! match: markdown link, import statement, schema-path keyword, quoted
//! literal, then the heuristic fallback. A line satisfying both the
//! markdown and schema tests must classify as a markdown link.

use crate::models::edge::ReferenceType;
use regex::Regex;
use std::sync::OnceLock;

/// Keys whose values are paths by schema convention.
const SCHEMA_PATH_KEYWORDS: [&str; 6] = ["path:", "file:", "src:", "source:", "target:", "ref:"];

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(import|from|use|require|include)\b")
            .unwrap_or_else(|e| panic!("import regex: {e}"))
    })
}

/// Label one textual occurrence of `raw_ref` inside `source_line`.
///
/// `RegexMatch` is never returned here; that variant marks references the
/// scanner extracted with a bare regex rather than a recognized syntax.
pub fn detect_reference_type(source_line: &str, raw_ref: &str) -> ReferenceType {
    if source_line.contains(&format!("]({raw_ref})"))
        || source_line.contains(&format!("]: {raw_ref}"))
    {
        return ReferenceType::MarkdownLink;
    }
    if import_re().is_match(source_line) {
        return ReferenceType::ImportStatement;
    }
    let lower = source_line.to_lowercase();
    if SCHEMA_PATH_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return ReferenceType::SchemaField;
    }
    if source_line.contains(&format!("\"{raw_ref}\""))
        || source_line.contains(&format!("'{raw_ref}'"))
    {
        return ReferenceType::PathLiteral;
    }
    ReferenceType::Heuristic
}
