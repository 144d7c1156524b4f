//! External scan-bundle contracts and loading.
//!
//! A scanner (file-system walker + format parsers) produces the normalized
//! inputs the engine consumes: the edge list, the file inventory, parsed
//! objects, patch proposals, and parse errors. Loading a bundle from disk
//! is the only I/O in this crate; the rules themselves never read files.

use crate::models::edge::Edge;
use crate::models::ParseError;
use serde::Deserialize;
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
/// One scan pass over the repository, as emitted by the external scanner.
pub struct ScanBundle {
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Existing repository-relative paths.
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub parsed: Vec<ParsedObject>,
    #[serde(default)]
    pub proposals: Vec<PatchProposal>,
    #[serde(default)]
    pub parse_errors: Vec<ParseError>,
}

#[derive(Debug, Clone, Deserialize)]
/// A structured object parsed from one file; `obj` is null when the file
/// has no structured content.
pub struct ParsedObject {
    pub file_path: String,
    #[serde(default)]
    pub obj: Option<Json>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// An automated repair proposal. Missing fields default to empty/zero
/// rather than failing the load.
pub struct PatchProposal {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub target_file: String,
    #[serde(default)]
    pub changed_files: usize,
    #[serde(default)]
    pub changed_lines: usize,
    #[serde(default)]
    pub ops: Vec<String>,
    #[serde(default)]
    pub touched_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
/// Summary of the patches an external repair mechanism actually applied.
pub struct AppliedPatches {
    #[serde(default)]
    pub has_out_of_scope_changes: bool,
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

/// Load a scan bundle from a JSON or YAML file, chosen by extension.
pub fn load_bundle(path: &Path) -> Result<ScanBundle, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.to_string_lossy(), e))?;
    parse_bundle(&data, is_yaml(path))
        .map_err(|e| format!("invalid scan bundle {}: {}", path.to_string_lossy(), e))
}

/// Load an applied-patch summary (JSON or YAML).
pub fn load_applied(path: &Path) -> Result<AppliedPatches, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.to_string_lossy(), e))?;
    let parsed: Result<AppliedPatches, String> = if is_yaml(path) {
        serde_yaml::from_str(&data).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&data).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| format!("invalid patch summary {}: {}", path.to_string_lossy(), e))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn parse_bundle(data: &str, yaml: bool) -> Result<ScanBundle, String> {
    if yaml {
        serde_yaml::from_str(data).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(data).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_json_bundle_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let mut f = fs::File::create(&path).unwrap();
        write!(
            f,
            "{}",
            r#"{
              "edges": [{
                "src_file": "docs/a.md",
                "dst_file": "docs/b.md",
                "edge_type": "markdown_link",
                "raw_target": "b.md",
                "confidence": 0.8
              }],
              "files": ["docs/a.md", "docs/b.md"],
              "proposals": [{"id": "p1", "ops": ["delete"]}]
            }"#
        )
        .unwrap();
        let bundle = load_bundle(&path).unwrap();
        assert_eq!(bundle.edges.len(), 1);
        assert_eq!(bundle.edges[0].line_range, None);
        assert_eq!(bundle.proposals[0].changed_lines, 0);
        assert!(bundle.parsed.is_empty());
        assert!(bundle.parse_errors.is_empty());
    }

    #[test]
    fn test_load_yaml_applied_summary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("applied.yaml");
        fs::write(&path, "has_out_of_scope_changes: true\npatch_count: 2\n").unwrap();
        let applied = load_applied(&path).unwrap();
        assert!(applied.has_out_of_scope_changes);
        assert_eq!(applied.extra.get("patch_count"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn test_invalid_bundle_is_an_error_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scan.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_bundle(&path).unwrap_err();
        assert!(err.contains("invalid scan bundle"));
    }
}
