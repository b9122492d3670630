use std::collections::BTreeSet;

use crate::config::EvaluatorConfig;
use crate::container::ChildField;
use crate::field::Field;

/// Collects leaf fields from nested containers, deduplicated by attribute.
///
/// The first occurrence of an attribute wins. Each collected field gets the
/// conditional-requirement marker appended to every rule list it has, once.
#[derive(Debug, Clone)]
pub struct ChildFieldRegistry {
    collected: Vec<Box<dyn Field>>,
    seen: BTreeSet<String>,
    marker_prefix: String,
}

impl Default for ChildFieldRegistry {
    fn default() -> Self {
        Self::with_config(&EvaluatorConfig::default())
    }
}

impl ChildFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EvaluatorConfig) -> Self {
        Self {
            collected: Vec::new(),
            seen: BTreeSet::new(),
            marker_prefix: config.required_marker_prefix.clone(),
        }
    }

    /// Walks `fields` depth-first in declaration order.
    pub fn extract(&mut self, fields: &[ChildField]) {
        let mut stack: Vec<&ChildField> = fields.iter().rev().collect();
        while let Some(field) = stack.pop() {
            match field {
                ChildField::Container(container) => {
                    stack.extend(container.fields().iter().rev());
                }
                ChildField::Leaf(field) => {
                    if !self.seen.insert(field.attribute().to_string()) {
                        continue;
                    }
                    let mut field = field.clone_box();
                    let marker = format!("{}{}", self.marker_prefix, field.attribute());
                    field.rule_sets_mut().append_to_existing(&marker);
                    self.collected.push(field);
                }
            }
        }
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.seen.contains(attribute)
    }

    pub fn fields(&self) -> &[Box<dyn Field>] {
        &self.collected
    }

    pub fn into_fields(self) -> Vec<Box<dyn Field>> {
        self.collected
    }
}

/// Flattens `fields` with the default marker prefix.
pub fn flatten(fields: &[ChildField]) -> Vec<Box<dyn Field>> {
    let mut registry = ChildFieldRegistry::new();
    registry.extract(fields);
    registry.into_fields()
}
