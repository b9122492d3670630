use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fieldgate_spec::{Field, RuleSetKind};
use serde_json::{Value, json};

use crate::cmd::print_json;
use crate::load;

#[derive(Args, Debug, Clone)]
pub struct FlattenArgs {
    /// Container definition (JSON)
    #[arg(long, value_name = "PATH")]
    pub definition: PathBuf,
    /// Evaluator settings (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub fn run(args: &FlattenArgs) -> Result<()> {
    let config = load::load_config(args.config.as_deref())?;
    let definition = load::load_definition(&args.definition)?;
    let container = definition
        .to_container()
        .with_context(|| format!("building container from {}", args.definition.display()))?;

    let fields = container
        .child_fields(&config)
        .iter()
        .map(|field| describe(field.as_ref()))
        .collect::<Vec<_>>();
    print_json(&fields)
}

fn describe(field: &dyn Field) -> Value {
    let request = json!({});
    let sets = field.rule_sets();
    let resolved = |kind| {
        sets.get(kind)
            .map(|source| Value::from(source.resolve(&request)))
            .unwrap_or(Value::Null)
    };
    json!({
        "attribute": field.attribute(),
        "rules": resolved(RuleSetKind::Rules),
        "creation_rules": resolved(RuleSetKind::CreationRules),
        "update_rules": resolved(RuleSetKind::UpdateRules),
    })
}
