use crate::argparse::{BackendKind, MatchArgs};
use crate::loader::{filters_from_expressions, load_filters, load_objects, load_resolution};
use crate::CliError;
use filter_engine::{
    AccessContext, EntityBackend, FilterBackend, FilterError, FilterEvaluator, FilterGroup,
    Resolver, StixBackend,
};
use serde_json::Value;

/// Result of one `match` run
#[derive(Debug, Default)]
pub struct MatchReport {
    pub matched: Vec<Value>,
    /// Objects that could not be evaluated, by position in the input
    pub skipped: Vec<usize>,
    pub total: usize,
}

fn access_context(args: &MatchArgs) -> Option<AccessContext> {
    if args.allowed_markings.is_empty() && !args.deny_unmarked {
        return None;
    }
    let access = AccessContext::with_markings(args.allowed_markings.iter().cloned());
    Some(if args.deny_unmarked {
        access.deny_unmarked()
    } else {
        access
    })
}

fn run<B: FilterBackend + Sync>(
    backend: B,
    resolver: &(dyn Resolver + Sync),
    access: Option<&AccessContext>,
    objects: &[Value],
    group: &FilterGroup,
    parallel: bool,
) -> Result<MatchReport, FilterError> {
    let mut evaluator = FilterEvaluator::new(backend, resolver);
    if let Some(access) = access {
        evaluator = evaluator.with_access(access);
    }
    let outcome = if parallel {
        evaluator.par_filter_many(objects, group)?
    } else {
        evaluator.filter_many(objects, group)?
    };
    Ok(MatchReport {
        matched: outcome.matched.into_iter().cloned().collect(),
        skipped: outcome.failures.iter().map(|f| f.index).collect(),
        total: objects.len(),
    })
}

pub fn collect_matches(args: &MatchArgs) -> anyhow::Result<MatchReport> {
    let objects = load_objects(&args.objects)?;
    let group = match &args.filters {
        Some(path) => load_filters(path)?,
        None => filters_from_expressions(&args.where_, args.any)?,
    };
    let resolution = load_resolution(args.resolution.as_deref())?;
    let access = access_context(args);
    log::debug!(
        "Matching {} objects against {} on the {:?} backend",
        objects.len(),
        group,
        args.backend
    );

    let report = match args.backend {
        BackendKind::Stix => run(
            StixBackend,
            &resolution,
            access.as_ref(),
            &objects,
            &group,
            args.parallel,
        ),
        BackendKind::Entity => run(
            EntityBackend,
            &resolution,
            access.as_ref(),
            &objects,
            &group,
            args.parallel,
        ),
    }
    .map_err(CliError::InvalidFilterTree)?;
    Ok(report)
}

pub fn handle_match_command(args: MatchArgs) -> anyhow::Result<()> {
    let report = collect_matches(&args)?;
    if !report.skipped.is_empty() {
        log::warn!(
            "{} of {} objects could not be evaluated",
            report.skipped.len(),
            report.total
        );
    }
    if args.count {
        println!("{}", report.matched.len());
        return Ok(());
    }
    for object in &report.matched {
        println!("{}", serde_json::to_string(object)?);
    }
    log::info!("{} of {} objects matched", report.matched.len(), report.total);
    Ok(())
}
