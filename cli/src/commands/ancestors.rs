use crate::argparse::AncestorsArgs;
use crate::CliError;
use filter_engine::type_hierarchy::{
    ancestors_of, canonical_name, is_abstract, stix_type_to_entity_type,
};

/// The type in its platform spelling followed by its ancestors, nearest first
pub fn ancestor_chain(entity_type: &str) -> Result<Vec<&'static str>, CliError> {
    let own = canonical_name(entity_type)
        .or_else(|| stix_type_to_entity_type(entity_type))
        .ok_or_else(|| CliError::UnknownEntityType(entity_type.to_string()))?;
    let mut chain = vec![own];
    chain.extend(ancestors_of(own));
    Ok(chain)
}

/// Chain joined with `>`, abstract types in brackets
pub fn render_chain(chain: &[&str]) -> String {
    chain
        .iter()
        .map(|t| {
            if is_abstract(t) {
                format!("[{}]", t)
            } else {
                t.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

pub fn handle_ancestors_command(args: AncestorsArgs) -> anyhow::Result<()> {
    let chain = ancestor_chain(&args.entity_type)?;
    println!("{}", render_chain(&chain));
    Ok(())
}
