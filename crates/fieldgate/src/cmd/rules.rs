use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use fieldgate_spec::RuleSetKind;
use serde_json::json;

use crate::cmd::print_json;
use crate::load;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RulesKind {
    /// Base rules only
    #[default]
    Rules,
    /// Base rules plus creation rules
    Creation,
    /// Base rules plus update rules
    Update,
}

impl From<RulesKind> for RuleSetKind {
    fn from(kind: RulesKind) -> Self {
        match kind {
            RulesKind::Rules => RuleSetKind::Rules,
            RulesKind::Creation => RuleSetKind::CreationRules,
            RulesKind::Update => RuleSetKind::UpdateRules,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    /// Container definition (JSON)
    #[arg(long, value_name = "PATH")]
    pub definition: PathBuf,
    /// Submitted request data (JSON object)
    #[arg(long, value_name = "PATH")]
    pub request: PathBuf,
    /// Which rule set to compute
    #[arg(long, value_enum, default_value_t = RulesKind::Rules)]
    pub kind: RulesKind,
}

pub fn run(args: &RulesArgs) -> Result<()> {
    let definition = load::load_definition(&args.definition)?;
    let request = load::read_json(&args.request)?;
    if !request.is_object() {
        tracing::warn!(
            path = %args.request.display(),
            "request data is not an object; every lookup will miss"
        );
    }

    let container = definition
        .to_container()
        .with_context(|| format!("building container from {}", args.definition.display()))?;
    let gate = container.are_dependencies_satisfied(&request);
    let rules = match args.kind {
        RulesKind::Rules => container.rules(&request),
        RulesKind::Creation => container.creation_rules(&request),
        RulesKind::Update => container.update_rules(&request),
    };
    tracing::debug!(
        kind = ?RuleSetKind::from(args.kind),
        attributes = rules.len(),
        "computed situational rules"
    );

    print_json(&json!({ "gate": gate, "rules": rules }))
}
