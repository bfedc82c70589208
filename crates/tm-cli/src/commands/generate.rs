use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tm_core::data_spec::{DataSpecificationInput, today};
use tm_core::generator::{generate_plain_results, generate_results};
use tm_core::results::JobResults;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GenerateArgs;
use crate::output::output;

/// Build results for the given arguments against an explicit "today".
pub fn build_results(args: &GenerateArgs, today: chrono::NaiveDate) -> anyhow::Result<JobResults> {
    let mut rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    if args.plain {
        return Ok(generate_plain_results(&args.template_ids, &mut rng));
    }

    let spec = DataSpecificationInput {
        file_type: args.file_type.map(Into::into),
        date_from: args.date_from,
        date_to: args.date_to,
    }
    .validate_at(today)
    .context("invalid data specification")?;

    Ok(generate_results(&args.template_ids, &spec, today, &mut rng))
}

pub fn handle(args: &GenerateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let results = build_results(args, today())?;
    tracing::debug!(
        templates = results.results_per_template.len(),
        samples = results.total_samples(),
        seeded = args.seed.is_some(),
        "results generated"
    );
    output(&results, flags.format)
}
