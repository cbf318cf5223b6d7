mod ancestors;
mod matching;
mod validate;

use crate::argparse::Commands;
pub use ancestors::{ancestor_chain, handle_ancestors_command, render_chain};
pub use matching::{collect_matches, handle_match_command, MatchReport};
pub use validate::{handle_validate_command, validate_filters};

pub fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Match(args) => handle_match_command(args),
        Commands::Validate(args) => handle_validate_command(args),
        Commands::Ancestors(args) => handle_ancestors_command(args),
    }
}
