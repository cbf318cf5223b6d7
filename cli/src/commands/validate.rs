use crate::argparse::{BackendKind, ValidateArgs};
use crate::loader::load_filters;
use crate::CliError;
use filter_engine::group::validate_group;
use filter_engine::{EntityBackend, FilterGroup, StixBackend};

pub fn validate_filters(args: &ValidateArgs) -> anyhow::Result<FilterGroup> {
    let group = load_filters(&args.filters)?;
    let checked = match args.backend {
        BackendKind::Stix => validate_group(&StixBackend, &group),
        BackendKind::Entity => validate_group(&EntityBackend, &group),
    };
    checked.map_err(CliError::InvalidFilterTree)?;
    Ok(group)
}

pub fn handle_validate_command(args: ValidateArgs) -> anyhow::Result<()> {
    let group = validate_filters(&args)?;
    println!("OK (depth {}): {}", group.depth(), group);
    Ok(())
}
