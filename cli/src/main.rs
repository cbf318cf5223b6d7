use cti_filter::argparse::parse_args;
use cti_filter::{commands, utils};

fn main() -> anyhow::Result<()> {
    let cli = parse_args();
    utils::init_logger(cli.verbose);

    commands::handle_command(cli.command)
}
