//! Built-in object schemas used by the schema-mismatch rule.
//!
//! A schema is selected by exact filename match (a file literally named
//! `WORKFLOW.md` maps to the `workflow` schema). The table is constructed
//! once at startup and passed by reference into the rule; there is no
//! ambient mutable state.

use serde_json::Value as Json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Expected JSON kind for a schema field
/// (string|number|integer|boolean|array|object|null).
pub enum JsonKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl JsonKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonKind::String => "string",
            JsonKind::Number => "number",
            JsonKind::Integer => "integer",
            JsonKind::Boolean => "boolean",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
            JsonKind::Null => "null",
        }
    }

    pub fn matches(self, value: &Json) -> bool {
        match self {
            JsonKind::String => value.is_string(),
            JsonKind::Number => value.is_number(),
            JsonKind::Integer => value.is_i64() || value.is_u64(),
            JsonKind::Boolean => value.is_boolean(),
            JsonKind::Array => value.is_array(),
            JsonKind::Object => value.is_object(),
            JsonKind::Null => value.is_null(),
        }
    }

    /// Kind name of an actual value, for type_error evidence.
    pub fn of(value: &Json) -> &'static str {
        match value {
            Json::String(_) => "string",
            Json::Number(_) => "number",
            Json::Bool(_) => "boolean",
            Json::Array(_) => "array",
            Json::Object(_) => "object",
            Json::Null => "null",
        }
    }
}

#[derive(Debug, Clone)]
/// One required field with its expected kind.
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: JsonKind,
}

#[derive(Debug, Clone)]
/// A named object schema: every listed field is required and type-checked.
pub struct Schema {
    pub name: &'static str,
    pub required: Vec<FieldSpec>,
}

#[derive(Debug, Clone)]
/// Filename-keyed schema registry.
pub struct SchemaTable {
    by_filename: BTreeMap<&'static str, Schema>,
}

impl SchemaTable {
    /// The built-in schemas for workflow and agent definition files.
    pub fn builtin() -> Self {
        let mut by_filename = BTreeMap::new();
        by_filename.insert(
            "WORKFLOW.md",
            Schema {
                name: "workflow",
                required: vec![
                    FieldSpec {
                        key: "name",
                        kind: JsonKind::String,
                    },
                    FieldSpec {
                        key: "steps",
                        kind: JsonKind::Array,
                    },
                ],
            },
        );
        by_filename.insert(
            "AGENTS.md",
            Schema {
                name: "agents",
                required: vec![FieldSpec {
                    key: "agents",
                    kind: JsonKind::Array,
                }],
            },
        );
        SchemaTable { by_filename }
    }

    /// Look up a schema by the file's exact (final-component) name.
    pub fn for_path(&self, file_path: &str) -> Option<&Schema> {
        let filename = file_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_path);
        self.by_filename.get(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_is_exact_filename() {
        let table = SchemaTable::builtin();
        assert_eq!(table.for_path("flows/WORKFLOW.md").map(|s| s.name), Some("workflow"));
        assert_eq!(table.for_path("AGENTS.md").map(|s| s.name), Some("agents"));
        assert!(table.for_path("workflow.md").is_none());
        assert!(table.for_path("notes/README.md").is_none());
    }

    #[test]
    fn test_kind_matching() {
        assert!(JsonKind::Array.matches(&json!([1, 2])));
        assert!(JsonKind::Integer.matches(&json!(3)));
        assert!(!JsonKind::Integer.matches(&json!(3.5)));
        assert!(JsonKind::Number.matches(&json!(3.5)));
        assert_eq!(JsonKind::of(&json!({"a": 1})), "object");
    }
}
