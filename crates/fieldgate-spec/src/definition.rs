use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::container::{ChildField, DependencyContainer};
use crate::field::BasicField;
use crate::rule::{DependencyRule, RuleWire};

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid container definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field #{index} of container '{container}' has an empty attribute")]
    EmptyAttribute { container: String, index: usize },
}

/// Declarative form of a [`DependencyContainer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContainerDefinition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attribute: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// `None` when the list is not an array of well-formed rules.
    #[serde(default = "no_dependencies", deserialize_with = "lenient_dependencies")]
    #[schemars(with = "Vec<RuleWire>")]
    pub dependencies: Option<Vec<RuleWire>>,
}

/// A child entry, tagged by `component`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "component", rename_all = "kebab-case")]
pub enum FieldDefinition {
    Field(LeafDefinition),
    DependencyContainer(ContainerDefinition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LeafDefinition {
    pub attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default = "default_true")]
    pub fillable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_rules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_rules: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

fn no_dependencies() -> Option<Vec<RuleWire>> {
    Some(Vec::new())
}

fn lenient_dependencies<'de, D>(deserializer: D) -> Result<Option<Vec<RuleWire>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let Value::Array(items) = raw else {
        warn!("dependencies is not an array; treating as malformed");
        return Ok(None);
    };
    match items
        .into_iter()
        .map(serde_json::from_value::<RuleWire>)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(rules) => Ok(Some(rules)),
        Err(err) => {
            warn!(error = %err, "dependency entry is malformed; treating list as malformed");
            Ok(None)
        }
    }
}

impl ContainerDefinition {
    pub fn from_json_str(raw: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_value(value: Value) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Builds the runtime container, with [`BasicField`] leaves.
    pub fn to_container(&self) -> Result<DependencyContainer, DefinitionError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            let child = match field {
                FieldDefinition::Field(leaf) => {
                    if leaf.attribute.is_empty() {
                        return Err(DefinitionError::EmptyAttribute {
                            container: self.attribute.clone(),
                            index,
                        });
                    }
                    ChildField::from(leaf.to_field())
                }
                FieldDefinition::DependencyContainer(nested) => {
                    ChildField::Container(nested.to_container()?)
                }
            };
            fields.push(child);
        }

        let dependencies = self.dependencies.as_ref().map(|rules| {
            rules
                .iter()
                .cloned()
                .map(DependencyRule::from)
                .collect::<Vec<_>>()
        });
        Ok(DependencyContainer::from_parts(
            self.attribute.clone(),
            fields,
            dependencies,
        ))
    }
}

impl LeafDefinition {
    pub fn to_field(&self) -> BasicField {
        let name = self.name.clone().unwrap_or_else(|| self.attribute.clone());
        let mut field = BasicField::new(name, self.attribute.clone())
            .readonly(self.readonly)
            .fillable(self.fillable);
        if let Some(rules) = &self.rules {
            field = field.rules(rules.iter().cloned());
        }
        if let Some(rules) = &self.creation_rules {
            field = field.creation_rules(rules.iter().cloned());
        }
        if let Some(rules) = &self.update_rules {
            field = field.update_rules(rules.iter().cloned());
        }
        field
    }
}

/// JSON schema of [`ContainerDefinition`].
pub fn definition_schema() -> Value {
    schema_for!(ContainerDefinition).to_value()
}
