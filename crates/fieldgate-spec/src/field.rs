use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::record::{Record, RequestData};

/// Callable producing a rule list from the submitted data.
pub type RuleCallback = Arc<dyn Fn(&dyn RequestData) -> Vec<String> + Send + Sync>;

/// A rule list, either declared up front or computed per request.
#[derive(Clone)]
pub enum RuleSource {
    Static(Vec<String>),
    Dynamic(RuleCallback),
}

impl fmt::Debug for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Static(rules) => f.debug_tuple("Static").field(rules).finish(),
            RuleSource::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl RuleSource {
    pub fn dynamic<F>(callback: F) -> Self
    where
        F: Fn(&dyn RequestData) -> Vec<String> + Send + Sync + 'static,
    {
        RuleSource::Dynamic(Arc::new(callback))
    }

    pub fn resolve(&self, request: &dyn RequestData) -> Vec<String> {
        match self {
            RuleSource::Static(rules) => rules.clone(),
            RuleSource::Dynamic(callback) => callback(request),
        }
    }

    /// Appends `rule`; dynamic sources get it appended to every produced list.
    pub fn append(&mut self, rule: String) {
        match self {
            RuleSource::Static(rules) => rules.push(rule),
            RuleSource::Dynamic(callback) => {
                let inner = Arc::clone(callback);
                *callback = Arc::new(move |request: &dyn RequestData| {
                    let mut rules = inner(request);
                    rules.push(rule.clone());
                    rules
                });
            }
        }
    }
}

impl From<Vec<String>> for RuleSource {
    fn from(rules: Vec<String>) -> Self {
        RuleSource::Static(rules)
    }
}

/// Which of a field's rule lists is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSetKind {
    Rules,
    CreationRules,
    UpdateRules,
}

/// The three optional rule lists a field may carry.
#[derive(Debug, Clone, Default)]
pub struct RuleSets {
    pub rules: Option<RuleSource>,
    pub creation_rules: Option<RuleSource>,
    pub update_rules: Option<RuleSource>,
}

impl RuleSets {
    pub fn get(&self, kind: RuleSetKind) -> Option<&RuleSource> {
        match kind {
            RuleSetKind::Rules => self.rules.as_ref(),
            RuleSetKind::CreationRules => self.creation_rules.as_ref(),
            RuleSetKind::UpdateRules => self.update_rules.as_ref(),
        }
    }

    pub fn get_mut(&mut self, kind: RuleSetKind) -> &mut Option<RuleSource> {
        match kind {
            RuleSetKind::Rules => &mut self.rules,
            RuleSetKind::CreationRules => &mut self.creation_rules,
            RuleSetKind::UpdateRules => &mut self.update_rules,
        }
    }

    /// Resolves one list; an absent list resolves to no rules.
    pub fn resolve(&self, kind: RuleSetKind, request: &dyn RequestData) -> Vec<String> {
        self.get(kind)
            .map(|source| source.resolve(request))
            .unwrap_or_default()
    }

    /// Appends `rule` to every list that exists. Absent lists stay absent.
    pub fn append_to_existing(&mut self, rule: &str) {
        for source in [
            &mut self.rules,
            &mut self.creation_rules,
            &mut self.update_rules,
        ]
        .into_iter()
        .flatten()
        {
            source.append(rule.to_string());
        }
    }
}

/// A form field grouped under a dependency container.
pub trait Field: fmt::Debug + Send + Sync {
    fn attribute(&self) -> &str;

    fn resolve(&mut self, record: &dyn Record);

    fn resolve_for_display(&mut self, record: &dyn Record);

    /// Copies the submitted value into `model`.
    fn fill(&self, request: &dyn RequestData, model: &mut Map<String, Value>);

    fn rule_sets(&self) -> &RuleSets;

    fn rule_sets_mut(&mut self) -> &mut RuleSets;

    fn is_readonly(&self, _request: &dyn RequestData) -> bool {
        false
    }

    fn is_fillable(&self) -> bool {
        true
    }

    /// Client payload for this field.
    fn to_json(&self) -> Value;

    fn clone_box(&self) -> Box<dyn Field>;
}

impl Clone for Box<dyn Field> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Plain value field reading and writing a single attribute.
#[derive(Debug, Clone)]
pub struct BasicField {
    name: String,
    attribute: String,
    value: Value,
    display_value: Value,
    readonly: bool,
    fillable: bool,
    rule_sets: RuleSets,
}

impl BasicField {
    pub fn new(name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute: attribute.into(),
            value: Value::Null,
            display_value: Value::Null,
            readonly: false,
            fillable: true,
            rule_sets: RuleSets::default(),
        }
    }

    pub fn rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule_sets.rules = Some(collect_rules(rules));
        self
    }

    pub fn creation_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule_sets.creation_rules = Some(collect_rules(rules));
        self
    }

    pub fn update_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule_sets.update_rules = Some(collect_rules(rules));
        self
    }

    pub fn rule_source(mut self, kind: RuleSetKind, source: RuleSource) -> Self {
        *self.rule_sets.get_mut(kind) = Some(source);
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn fillable(mut self, fillable: bool) -> Self {
        self.fillable = fillable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn display_value(&self) -> &Value {
        &self.display_value
    }
}

fn collect_rules<I, S>(rules: I) -> RuleSource
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    RuleSource::Static(rules.into_iter().map(Into::into).collect())
}

impl Field for BasicField {
    fn attribute(&self) -> &str {
        &self.attribute
    }

    fn resolve(&mut self, record: &dyn Record) {
        self.value = record.lookup(&self.attribute);
    }

    fn resolve_for_display(&mut self, record: &dyn Record) {
        self.display_value = record.lookup(&self.attribute);
    }

    fn fill(&self, request: &dyn RequestData, model: &mut Map<String, Value>) {
        if request.has(&self.attribute) {
            model.insert(self.attribute.clone(), request.input(&self.attribute));
        }
    }

    fn rule_sets(&self) -> &RuleSets {
        &self.rule_sets
    }

    fn rule_sets_mut(&mut self) -> &mut RuleSets {
        &mut self.rule_sets
    }

    fn is_readonly(&self, _request: &dyn RequestData) -> bool {
        self.readonly
    }

    fn is_fillable(&self) -> bool {
        self.fillable
    }

    fn to_json(&self) -> Value {
        json!({
            "component": "field",
            "name": self.name,
            "attribute": self.attribute,
            "value": self.value,
            "displayedAs": self.display_value,
            "readonly": self.readonly,
        })
    }

    fn clone_box(&self) -> Box<dyn Field> {
        Box::new(self.clone())
    }
}
