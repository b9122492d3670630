use serde_json::Value;
use tracing::debug;

use crate::compare::{is_empty, is_null_or_zero, loose_eq, to_loose_string};
use crate::config::EvaluatorConfig;
use crate::record::Record;
use crate::rule::{DependencyRule, Predicate};

/// Evaluates a single rule against a fully resolved record.
pub fn evaluate_rule<R>(record: &R, rule: &DependencyRule, config: &EvaluatorConfig) -> bool
where
    R: Record + ?Sized,
{
    let value = record.lookup(&config.normalize_path(&rule.property_path));
    let satisfied = match &rule.predicate {
        Predicate::Empty => is_empty(&value),
        Predicate::NotEmpty => !is_empty(&value),
        Predicate::NullOrZero => is_null_or_zero(&value),
        Predicate::NotEquals(expected) => !loose_eq(&value, expected),
        Predicate::Equals(expected) => {
            loose_eq(expected, &value) || polymorphic_type_matches(record, rule, expected, config)
        }
    };
    debug!(
        field = %rule.field_name,
        property = %rule.property_path,
        kind = ?rule.kind(),
        satisfied,
        "display rule evaluated"
    );
    satisfied
}

// Polymorphic relations store a qualified type name next to the key; the rule value
// names the short type.
fn polymorphic_type_matches<R>(
    record: &R,
    rule: &DependencyRule,
    expected: &Value,
    config: &EvaluatorConfig,
) -> bool
where
    R: Record + ?Sized,
{
    let discriminator = record.attribute(&format!(
        "{}{}",
        rule.property_path, config.polymorphic_type_suffix
    ));
    if discriminator.is_null() {
        return false;
    }
    let suffix = format!(
        "{}{}",
        config.polymorphic_namespace_separator,
        to_loose_string(expected)
    );
    to_loose_string(&discriminator).ends_with(&suffix)
}

/// Recomputes `satisfied` on every rule, in declaration order, without short-circuiting.
pub fn annotate_rules<R>(record: &R, rules: &mut [DependencyRule], config: &EvaluatorConfig)
where
    R: Record + ?Sized,
{
    for rule in rules.iter_mut() {
        rule.satisfied = evaluate_rule(record, rule, config);
    }
}

/// Returns a per-request annotated copy of `rules`; the declared rules stay untouched.
pub fn evaluate_for_display<R>(
    record: &R,
    rules: &[DependencyRule],
    config: &EvaluatorConfig,
) -> Vec<DependencyRule>
where
    R: Record + ?Sized,
{
    let mut annotated = rules.to_vec();
    annotate_rules(record, &mut annotated, config);
    annotated
}
