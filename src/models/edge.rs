//! Reference-graph edge and reference-type models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One directed inferred reference from a source file to a destination.
///
/// `dst_file` may be unresolved (the raw string as written) when the
/// destination does not exist in the repository; `edge_type` is an open
/// string set (`import`, `extends`, `uses`, `path_literal`, `include`, ...)
/// because scanners are free to invent further kinds.
pub struct Edge {
    pub src_file: String,
    pub dst_file: String,
    pub edge_type: String,
    pub raw_target: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_range: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl Edge {
    /// First line of the edge occurrence, when the scanner recorded one.
    pub fn line(&self) -> Option<u32> {
        self.line_range.map(|(start, _)| start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a raw textual reference occurrence was detected. Each variant maps
/// to a fixed base-confidence weight in `confidence::base_confidence`.
pub enum ReferenceType {
    SchemaField,
    MarkdownLink,
    ImportStatement,
    PathLiteral,
    RegexMatch,
    Heuristic,
}

impl ReferenceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceType::SchemaField => "schema_field",
            ReferenceType::MarkdownLink => "markdown_link",
            ReferenceType::ImportStatement => "import_statement",
            ReferenceType::PathLiteral => "path_literal",
            ReferenceType::RegexMatch => "regex_match",
            ReferenceType::Heuristic => "heuristic",
        }
    }

    /// Parse a scanner-supplied kind string. Unknown kinds return `None`
    /// and score with the fallback base weight.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "schema_field" => Some(ReferenceType::SchemaField),
            "markdown_link" => Some(ReferenceType::MarkdownLink),
            "import_statement" => Some(ReferenceType::ImportStatement),
            "path_literal" => Some(ReferenceType::PathLiteral),
            "regex_match" => Some(ReferenceType::RegexMatch),
            "heuristic" => Some(ReferenceType::Heuristic),
            _ => None,
        }
    }
}
