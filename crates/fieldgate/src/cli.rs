use std::ffi::OsString;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use crate::cmd::{
    self, display::DisplayArgs, flatten::FlattenArgs, rules::RulesArgs, schema::SchemaArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "fieldgate",
    about = "Evaluate conditional form field containers",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Log rule evaluation details to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a container against a record and annotate its dependencies
    Display(DisplayArgs),
    /// Compute the validation rules activated by submitted data
    Rules(RulesArgs),
    /// List the flattened child fields with injected requirement markers
    Flatten(FlattenArgs),
    /// Print the JSON schema of container definitions
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    run_from(std::env::args_os())
}

pub fn run_from<I, T>(argv: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Display(args) => cmd::display::run(&args),
        Commands::Rules(args) => cmd::rules::run(&args),
        Commands::Flatten(args) => cmd::flatten::run(&args),
        Commands::Schema(args) => cmd::schema::run(&args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
