use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use crate::cmd::print_json;
use crate::load;

#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Container definition (JSON)
    #[arg(long, value_name = "PATH")]
    pub definition: PathBuf,
    /// Stored record to evaluate against (JSON object)
    #[arg(long, value_name = "PATH")]
    pub record: PathBuf,
    /// Evaluator settings (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub fn run(args: &DisplayArgs) -> Result<()> {
    let config = load::load_config(args.config.as_deref())?;
    let definition = load::load_definition(&args.definition)?;
    let record = load::read_json(&args.record)?;

    let mut container = definition
        .to_container()
        .with_context(|| format!("building container from {}", args.definition.display()))?;
    container.resolve(&record);
    container.resolve_for_display(&record, &config);
    tracing::debug!(
        attribute = container.attribute(),
        satisfied = container.all_satisfied(),
        "display evaluation finished"
    );

    print_json(&json!({
        "container": container.to_json(),
        "all_satisfied": container.all_satisfied(),
    }))
}
