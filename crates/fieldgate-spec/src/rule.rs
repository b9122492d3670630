use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Condition a dependency rule applies to the referenced value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals(Value),
    NotEquals(Value),
    Empty,
    NotEmpty,
    NullOrZero,
}

/// Discriminant of [`Predicate`] without the comparison value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    Equals,
    NotEquals,
    Empty,
    NotEmpty,
    NullOrZero,
}

impl Predicate {
    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Equals(_) => PredicateKind::Equals,
            Predicate::NotEquals(_) => PredicateKind::NotEquals,
            Predicate::Empty => PredicateKind::Empty,
            Predicate::NotEmpty => PredicateKind::NotEmpty,
            Predicate::NullOrZero => PredicateKind::NullOrZero,
        }
    }
}

/// One declared condition on another field's value.
///
/// `satisfied` is a display-time annotation; it is recomputed on every display
/// evaluation and ignored by the request gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RuleWire", into = "RuleWire")]
pub struct DependencyRule {
    pub field_name: String,
    pub property_path: String,
    pub predicate: Predicate,
    pub satisfied: bool,
}

impl DependencyRule {
    pub fn new(path: &str, predicate: Predicate) -> Self {
        let (field_name, property_path) = split_path(path);
        Self {
            field_name,
            property_path,
            predicate,
            satisfied: false,
        }
    }

    pub fn equals(path: &str, value: impl Into<Value>) -> Self {
        Self::new(path, Predicate::Equals(value.into()))
    }

    pub fn not_equals(path: &str, value: impl Into<Value>) -> Self {
        Self::new(path, Predicate::NotEquals(value.into()))
    }

    pub fn empty(path: &str) -> Self {
        Self::new(path, Predicate::Empty)
    }

    pub fn not_empty(path: &str) -> Self {
        Self::new(path, Predicate::NotEmpty)
    }

    pub fn null_or_zero(path: &str) -> Self {
        Self::new(path, Predicate::NullOrZero)
    }

    pub fn kind(&self) -> PredicateKind {
        self.predicate.kind()
    }
}

/// Splits `"field.property"` on the first dot.
///
/// A bare `"field"` compares its own value, so the property defaults to the field
/// name. An empty property segment falls back the same way.
pub fn split_path(path: &str) -> (String, String) {
    match path.split_once('.') {
        Some((field, property)) if !property.is_empty() => (field.to_string(), property.to_string()),
        Some((field, _)) => (field.to_string(), field.to_string()),
        None => (path.to_string(), path.to_string()),
    }
}

/// Serialized rule shape shared with clients: `field`, `property` and exactly one
/// of `value`, `not`, `empty`, `notEmpty`, `nullOrZero`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RuleWire {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Value>")]
    pub value: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<Value>")]
    pub not: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_empty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_or_zero: Option<bool>,
    #[serde(default)]
    pub satisfied: bool,
}

// An explicit `null` is a comparison value, not an absent key.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<RuleWire> for DependencyRule {
    fn from(wire: RuleWire) -> Self {
        // Priority: empty > notEmpty > nullOrZero > not > value
        let predicate = if wire.empty.is_some() {
            Predicate::Empty
        } else if wire.not_empty.is_some() {
            Predicate::NotEmpty
        } else if wire.null_or_zero.is_some() {
            Predicate::NullOrZero
        } else if let Some(value) = wire.not {
            Predicate::NotEquals(value)
        } else {
            Predicate::Equals(wire.value.unwrap_or(Value::Null))
        };

        let (field_name, property_path) = match wire.property {
            Some(property) if !property.is_empty() => (wire.field, property),
            _ => split_path(&wire.field),
        };

        Self {
            field_name,
            property_path,
            predicate,
            satisfied: wire.satisfied,
        }
    }
}

impl From<DependencyRule> for RuleWire {
    fn from(rule: DependencyRule) -> Self {
        let mut wire = RuleWire {
            field: rule.field_name,
            property: Some(rule.property_path),
            satisfied: rule.satisfied,
            ..RuleWire::default()
        };
        match rule.predicate {
            Predicate::Equals(value) => wire.value = Some(value),
            Predicate::NotEquals(value) => wire.not = Some(value),
            Predicate::Empty => wire.empty = Some(true),
            Predicate::NotEmpty => wire.not_empty = Some(true),
            Predicate::NullOrZero => wire.null_or_zero = Some(true),
        }
        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_field_compares_itself() {
        assert_eq!(split_path("a"), ("a".into(), "a".into()));
        assert_eq!(split_path("a.b"), ("a".into(), "b".into()));
        assert_eq!(split_path("a.b.c"), ("a".into(), "b.c".into()));
    }

    #[test]
    fn malformed_paths_degrade() {
        assert_eq!(split_path("a."), ("a".into(), "a".into()));
        assert_eq!(split_path(".b"), ("".into(), "b".into()));
        assert_eq!(split_path(""), ("".into(), "".into()));
    }

    #[test]
    fn wire_null_is_a_comparison_value() {
        let rule: DependencyRule =
            serde_json::from_value(json!({ "field": "kind", "not": null })).expect("rule");
        assert_eq!(rule.predicate, Predicate::NotEquals(Value::Null));
    }
}
