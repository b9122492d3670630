use tracing::{debug, warn};

use crate::compare::{is_empty, is_null_or_zero, loose_eq};
use crate::record::RequestData;
use crate::rule::{DependencyRule, Predicate};

/// Whether one rule counts as satisfied by submitted data.
///
/// Only the raw property key is consulted: no relation traversal and no
/// polymorphic fallback. `Empty` is presence based, so a submitted empty value
/// does not satisfy it.
pub fn rule_counts_satisfied<Q>(request: &Q, rule: &DependencyRule) -> bool
where
    Q: RequestData + ?Sized,
{
    let key = rule.property_path.as_str();
    match &rule.predicate {
        Predicate::Empty => !request.has(key),
        Predicate::NotEmpty => request.has(key) && !is_empty(&request.input(key)),
        Predicate::NullOrZero => is_null_or_zero(&request.input(key)),
        Predicate::NotEquals(excluded) => !loose_eq(excluded, &request.input(key)),
        Predicate::Equals(expected) => loose_eq(expected, &request.input(key)),
    }
}

/// Decides whether validation rules of a container (and its children) are active.
///
/// `None` stands for an absent or malformed rule list. Both that and an empty
/// list fail closed.
pub fn are_dependencies_satisfied<Q>(request: &Q, rules: Option<&[DependencyRule]>) -> bool
where
    Q: RequestData + ?Sized,
{
    let Some(rules) = rules else {
        warn!("dependency list missing or malformed; validation stays inactive");
        return false;
    };
    if rules.is_empty() {
        return false;
    }

    let satisfied = rules
        .iter()
        .filter(|rule| rule_counts_satisfied(request, rule))
        .count();
    debug!(satisfied, total = rules.len(), "request dependency gate");
    satisfied == rules.len()
}
