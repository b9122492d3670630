use std::collections::BTreeMap;

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::config::EvaluatorConfig;
use crate::display::annotate_rules;
use crate::field::{BasicField, Field, RuleSetKind};
use crate::flatten::ChildFieldRegistry;
use crate::gate::are_dependencies_satisfied;
use crate::record::{Record, RequestData};
use crate::rule::{DependencyRule, Predicate};

/// Component name reported to clients.
pub const COMPONENT: &str = "dependency-container";

/// Validation rules keyed by field attribute.
pub type RuleMap = BTreeMap<String, Vec<String>>;

/// A field grouped under a container: a leaf field or another container.
#[derive(Debug, Clone)]
pub enum ChildField {
    Leaf(Box<dyn Field>),
    Container(DependencyContainer),
}

impl ChildField {
    pub fn leaf(field: impl Field + 'static) -> Self {
        ChildField::Leaf(Box::new(field))
    }
}

impl From<BasicField> for ChildField {
    fn from(field: BasicField) -> Self {
        ChildField::leaf(field)
    }
}

impl From<DependencyContainer> for ChildField {
    fn from(container: DependencyContainer) -> Self {
        ChildField::Container(container)
    }
}

/// Groups child fields and reveals/requires them depending on other field values.
#[derive(Debug, Clone)]
pub struct DependencyContainer {
    attribute: String,
    fields: Vec<ChildField>,
    // `None` marks an absent or malformed dependency list.
    dependencies: Option<Vec<DependencyRule>>,
}

impl DependencyContainer {
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<ChildField>,
    {
        Self {
            attribute: String::new(),
            fields: fields.into_iter().map(Into::into).collect(),
            dependencies: Some(Vec::new()),
        }
    }

    pub(crate) fn from_parts(
        attribute: String,
        fields: Vec<ChildField>,
        dependencies: Option<Vec<DependencyRule>>,
    ) -> Self {
        Self {
            attribute,
            fields,
            dependencies,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Depends on `path` loosely equalling `value`.
    pub fn depends_on(self, path: &str, value: impl Into<Value>) -> Self {
        self.push_rule(DependencyRule::new(path, Predicate::Equals(value.into())))
    }

    pub fn depends_on_not(self, path: &str, value: impl Into<Value>) -> Self {
        self.push_rule(DependencyRule::new(path, Predicate::NotEquals(value.into())))
    }

    pub fn depends_on_empty(self, path: &str) -> Self {
        self.push_rule(DependencyRule::new(path, Predicate::Empty))
    }

    pub fn depends_on_not_empty(self, path: &str) -> Self {
        self.push_rule(DependencyRule::new(path, Predicate::NotEmpty))
    }

    pub fn depends_on_null_or_zero(self, path: &str) -> Self {
        self.push_rule(DependencyRule::new(path, Predicate::NullOrZero))
    }

    pub fn push_rule(mut self, rule: DependencyRule) -> Self {
        self.dependencies.get_or_insert_with(Vec::new).push(rule);
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn fields(&self) -> &[ChildField] {
        &self.fields
    }

    /// Declared rules; empty when the list is absent or malformed.
    pub fn dependencies(&self) -> &[DependencyRule] {
        self.dependencies.as_deref().unwrap_or_default()
    }

    pub fn has_malformed_dependencies(&self) -> bool {
        self.dependencies.is_none()
    }

    /// Forwards resolution to every child.
    pub fn resolve(&mut self, record: &dyn Record) {
        for field in &mut self.fields {
            match field {
                ChildField::Leaf(field) => field.resolve(record),
                ChildField::Container(container) => container.resolve(record),
            }
        }
    }

    /// Resolves children for display, then annotates every declared rule.
    pub fn resolve_for_display(&mut self, record: &dyn Record, config: &EvaluatorConfig) {
        for field in &mut self.fields {
            match field {
                ChildField::Leaf(field) => field.resolve_for_display(record),
                ChildField::Container(container) => container.resolve_for_display(record, config),
            }
        }

        if let Some(rules) = self.dependencies.as_mut() {
            annotate_rules(record, rules, config);
        }
    }

    /// Whether every declared rule was satisfied by the last display resolution.
    pub fn all_satisfied(&self) -> bool {
        let rules = self.dependencies();
        !rules.is_empty() && rules.iter().all(|rule| rule.satisfied)
    }

    /// Fills `model` from every writable child; returns the attributes handed to `fill`.
    pub fn fill_into(
        &self,
        request: &dyn RequestData,
        model: &mut Map<String, Value>,
    ) -> Vec<String> {
        let mut filled = Vec::new();
        for field in &self.fields {
            match field {
                ChildField::Leaf(field) => {
                    if field.is_readonly(request) || !field.is_fillable() {
                        continue;
                    }
                    field.fill(request, model);
                    filled.push(field.attribute().to_string());
                }
                ChildField::Container(container) => {
                    filled.extend(container.fill_into(request, model));
                }
            }
        }
        filled
    }

    /// Request gate for this container's validation rules.
    pub fn are_dependencies_satisfied(&self, request: &dyn RequestData) -> bool {
        are_dependencies_satisfied(request, self.dependencies.as_deref())
    }

    /// Rule map for one rule-set kind.
    ///
    /// The container's own attribute is always present with no rules. Children
    /// are only included when the request gate passes.
    pub fn situational_rules(&self, request: &dyn RequestData, kind: RuleSetKind) -> RuleMap {
        let mut rules = RuleMap::from([(self.attribute.clone(), Vec::new())]);
        if !self.are_dependencies_satisfied(request) {
            debug!(container = %self.attribute, ?kind, "dependencies unmet; child rules skipped");
            return rules;
        }

        for field in &self.fields {
            match field {
                ChildField::Leaf(field) => {
                    rules
                        .entry(field.attribute().to_string())
                        .or_default()
                        .extend(field.rule_sets().resolve(kind, request));
                }
                ChildField::Container(container) => {
                    merge_rule_maps(&mut rules, container.situational_rules(request, kind));
                }
            }
        }
        rules
    }

    pub fn rules(&self, request: &dyn RequestData) -> RuleMap {
        self.situational_rules(request, RuleSetKind::Rules)
    }

    /// General rules followed by creation rules, per attribute.
    pub fn creation_rules(&self, request: &dyn RequestData) -> RuleMap {
        let mut rules = self.rules(request);
        merge_rule_maps(
            &mut rules,
            self.situational_rules(request, RuleSetKind::CreationRules),
        );
        rules
    }

    /// General rules followed by update rules, per attribute.
    pub fn update_rules(&self, request: &dyn RequestData) -> RuleMap {
        let mut rules = self.rules(request);
        merge_rule_maps(
            &mut rules,
            self.situational_rules(request, RuleSetKind::UpdateRules),
        );
        rules
    }

    /// Leaf fields of this container and all nested ones, deduplicated, with the
    /// conditional-requirement marker applied.
    pub fn child_fields(&self, config: &EvaluatorConfig) -> Vec<Box<dyn Field>> {
        let mut registry = ChildFieldRegistry::with_config(config);
        registry.extract(&self.fields);
        registry.into_fields()
    }

    /// Client payload: component, children and the (annotated) dependencies.
    pub fn to_json(&self) -> Value {
        let fields = self
            .fields
            .iter()
            .map(|field| match field {
                ChildField::Leaf(field) => field.to_json(),
                ChildField::Container(container) => container.to_json(),
            })
            .collect::<Vec<_>>();
        let dependencies = match &self.dependencies {
            Some(rules) => serde_json::to_value(rules).unwrap_or(Value::Null),
            None => Value::Null,
        };
        json!({
            "component": COMPONENT,
            "attribute": self.attribute,
            "showOnIndex": false,
            "fields": fields,
            "dependencies": dependencies,
        })
    }
}

fn merge_rule_maps(target: &mut RuleMap, extra: RuleMap) {
    for (attribute, rules) in extra {
        target.entry(attribute).or_default().extend(rules);
    }
}
