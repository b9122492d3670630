use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tunables shared by display-time evaluation and child-field flattening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Relation separator rewritten to `.` before record lookups.
    pub relation_separator: String,
    /// Prefix of the conditional-requirement rule appended to child fields.
    pub required_marker_prefix: String,
    /// Suffix of the sibling attribute holding a polymorphic type name.
    pub polymorphic_type_suffix: String,
    /// Separator preceding the short type name inside a qualified type name.
    pub polymorphic_namespace_separator: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            relation_separator: "->".into(),
            required_marker_prefix: "sometimes:required:".into(),
            polymorphic_type_suffix: "_type".into(),
            polymorphic_namespace_separator: "\\".into(),
        }
    }
}

impl EvaluatorConfig {
    /// Rewrites relation separators in `path` to the dotted form.
    pub fn normalize_path(&self, path: &str) -> String {
        if self.relation_separator.is_empty() {
            return path.to_string();
        }
        path.replace(&self.relation_separator, ".")
    }
}
