use anyhow::Result;
use clap::Args;
use fieldgate_spec::definition_schema;

use crate::cmd::print_json;

#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {}

pub fn run(_args: &SchemaArgs) -> Result<()> {
    print_json(&definition_schema())
}
