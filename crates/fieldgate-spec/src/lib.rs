#![allow(missing_docs)]

pub mod compare;
pub mod config;
pub mod container;
pub mod definition;
pub mod display;
pub mod field;
pub mod flatten;
pub mod gate;
pub mod record;
pub mod rule;

pub use compare::{is_empty, is_null_or_zero, loose_eq};
pub use config::EvaluatorConfig;
pub use container::{COMPONENT, ChildField, DependencyContainer, RuleMap};
pub use definition::{
    ContainerDefinition, DefinitionError, FieldDefinition, LeafDefinition, definition_schema,
};
pub use display::{annotate_rules, evaluate_for_display, evaluate_rule};
pub use field::{BasicField, Field, RuleCallback, RuleSetKind, RuleSets, RuleSource};
pub use flatten::{ChildFieldRegistry, flatten};
pub use gate::{are_dependencies_satisfied, rule_counts_satisfied};
pub use record::{Record, RequestData};
pub use rule::{DependencyRule, Predicate, PredicateKind, RuleWire, split_path};
