use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ctif",
    about = "Match STIX objects and platform entities against filter trees",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Log evaluation details (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Pick which subcommand to use
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the objects matching a filter tree
    Match(MatchArgs),
    /// Check a filter tree without evaluating it
    Validate(ValidateArgs),
    /// Print the abstract types an entity type descends from
    Ancestors(AncestorsArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Raw STIX objects, closed key list, single-key filters
    #[default]
    Stix,
    /// Indexed entities, any field path, multi-key filters
    Entity,
}

#[derive(Args, Debug, Default)]
pub struct MatchArgs {
    /// JSON file holding an array of objects or a STIX bundle
    #[arg(long)]
    pub objects: PathBuf,

    /// Filter tree, JSON or YAML (by extension)
    #[arg(long, conflicts_with = "where_")]
    pub filters: Option<PathBuf>,

    /// Filter expression such as "confidence gt 50" or "entity_type eq Malware|Software", repeatable
    #[arg(long = "where", value_name = "EXPR")]
    pub where_: Vec<String>,

    /// Combine the --where expressions with OR instead of AND
    #[arg(long)]
    pub any: bool,

    /// JSON object mapping raw identifiers to canonical ones
    #[arg(long)]
    pub resolution: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = BackendKind::Stix)]
    pub backend: BackendKind,

    /// Marking the reader is cleared for, repeatable. Enables marking checks.
    #[arg(long = "allowed-marking", value_name = "MARKING")]
    pub allowed_markings: Vec<String>,

    /// Hide objects carrying no marking at all
    #[arg(long)]
    pub deny_unmarked: bool,

    /// Only print the number of matching objects
    #[arg(long)]
    pub count: bool,

    /// Evaluate objects on all cores
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Filter tree, JSON or YAML (by extension)
    #[arg(long)]
    pub filters: PathBuf,

    #[arg(long, value_enum, default_value_t = BackendKind::Stix)]
    pub backend: BackendKind,
}

#[derive(Args, Debug)]
pub struct AncestorsArgs {
    /// Entity type, e.g. Malware or ipv4-addr
    pub entity_type: String,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
