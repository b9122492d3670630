use serde_json::json;

use fieldgate_spec::{
    BasicField, ChildField, ChildFieldRegistry, DependencyContainer, EvaluatorConfig, RuleSetKind,
    RuleSource, flatten,
};

fn resolve(field: &dyn fieldgate_spec::Field, kind: RuleSetKind) -> Option<Vec<String>> {
    field
        .rule_sets()
        .get(kind)
        .map(|source| source.resolve(&json!({})))
}

fn shared_x() -> BasicField {
    BasicField::new("X", "x")
        .rules(["string"])
        .creation_rules(["max:5"])
        .update_rules(Vec::<String>::new())
}

#[test]
fn shared_field_is_collected_once_with_one_marker_per_list() {
    let first = DependencyContainer::new([
        ChildField::from(shared_x()),
        ChildField::from(BasicField::new("Y", "y").rules(["integer"])),
    ]);
    let second = DependencyContainer::new([shared_x()]);
    let outer = DependencyContainer::new([first, second]);

    let fields = flatten(outer.fields());

    let attributes = fields.iter().map(|field| field.attribute()).collect::<Vec<_>>();
    assert_eq!(attributes, vec!["x", "y"]);

    let x = fields[0].as_ref();
    assert_eq!(
        resolve(x, RuleSetKind::Rules),
        Some(vec!["string".to_string(), "sometimes:required:x".to_string()])
    );
    assert_eq!(
        resolve(x, RuleSetKind::CreationRules),
        Some(vec!["max:5".to_string(), "sometimes:required:x".to_string()])
    );
    assert_eq!(
        resolve(x, RuleSetKind::UpdateRules),
        Some(vec!["sometimes:required:x".to_string()])
    );
}

#[test]
fn absent_rule_lists_stay_absent() {
    let container = DependencyContainer::new([BasicField::new("Plain", "plain")]);
    let fields = flatten(container.fields());
    assert_eq!(fields.len(), 1);
    assert_eq!(resolve(fields[0].as_ref(), RuleSetKind::Rules), None);
    assert_eq!(resolve(fields[0].as_ref(), RuleSetKind::CreationRules), None);
}

#[test]
fn first_occurrence_wins_in_declaration_order() {
    let nested = DependencyContainer::new([
        BasicField::new("Deep", "deep"),
        BasicField::new("Dup", "dup").rules(["nested"]),
    ]);
    let container = DependencyContainer::new([
        ChildField::from(BasicField::new("Top", "top")),
        ChildField::from(nested),
        ChildField::from(BasicField::new("Dup", "dup").rules(["top-level"])),
    ]);

    let fields = flatten(container.fields());
    let attributes = fields.iter().map(|field| field.attribute()).collect::<Vec<_>>();
    assert_eq!(attributes, vec!["top", "deep", "dup"]);
    assert_eq!(
        resolve(fields[2].as_ref(), RuleSetKind::Rules),
        Some(vec!["nested".to_string(), "sometimes:required:dup".to_string()])
    );
}

#[test]
fn dynamic_rules_receive_the_marker_after_evaluation() {
    let source = RuleSource::dynamic(|request| {
        if request.has("strict") {
            vec!["min:10".to_string()]
        } else {
            vec![]
        }
    });
    let field = BasicField::new("Code", "code").rule_source(RuleSetKind::Rules, source);
    let fields = flatten(&[ChildField::from(field)]);

    let rules = fields[0].rule_sets().resolve(RuleSetKind::Rules, &json!({ "strict": true }));
    assert_eq!(rules, vec!["min:10", "sometimes:required:code"]);
    let rules = fields[0].rule_sets().resolve(RuleSetKind::Rules, &json!({}));
    assert_eq!(rules, vec!["sometimes:required:code"]);
}

#[test]
fn declared_fields_are_left_untouched() {
    let container = DependencyContainer::new([shared_x()]);
    let _ = flatten(container.fields());
    let again = flatten(container.fields());
    assert_eq!(
        resolve(again[0].as_ref(), RuleSetKind::Rules),
        Some(vec!["string".to_string(), "sometimes:required:x".to_string()])
    );
}

#[test]
fn registry_uses_configured_marker_prefix() {
    let config = EvaluatorConfig {
        required_marker_prefix: "required_if_visible:".into(),
        ..EvaluatorConfig::default()
    };
    let mut registry = ChildFieldRegistry::with_config(&config);
    registry.extract(&[ChildField::from(shared_x())]);
    registry.extract(&[ChildField::from(shared_x())]);

    assert!(registry.contains("x"));
    assert_eq!(registry.fields().len(), 1);
    assert_eq!(
        resolve(registry.fields()[0].as_ref(), RuleSetKind::Rules),
        Some(vec!["string".to_string(), "required_if_visible:x".to_string()])
    );
}
