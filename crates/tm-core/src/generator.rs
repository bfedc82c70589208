//! Mock job execution: random submission and synthetic result generation.
//!
//! Nothing here performs real matching. Every function takes the random
//! source as a parameter so callers decide between a seeded generator (tests,
//! reproducible CLI output) and `rand::thread_rng()` (HTTP requests).

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::data_spec::DataSpecification;
use crate::enums::{FileType, JobState};
use crate::results::{JobResults, SampleDetail, SampleResult, TemplateResult};

/// Inclusive bounds on samples generated per template.
pub const SAMPLES_PER_TEMPLATE: (usize, usize) = (1, 100);

/// Inclusive bounds on the simulated run time, in milliseconds.
pub const RUN_TIME_MS: (u64, u64) = (1_000, 10_000);

/// Outcome of submitting (or resubmitting) a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Fresh opaque job token.
    pub job_id: String,
    pub job_state: JobState,
}

/// Submit a job to the mock scheduler.
///
/// Assigns a new UUIDv4 token and a state chosen uniformly from all four
/// [`JobState`] variants, terminal ones included.
pub fn submit<R: Rng + ?Sized>(rng: &mut R) -> Submission {
    Submission {
        job_id: Uuid::new_v4().to_string(),
        job_state: JobState::random(rng),
    }
}

/// Generate results shaped by a data specification.
///
/// Sample ids start at 1 and increase across all templates of the call.
/// Missing date bounds are replaced by `today` (see
/// [`DataSpecification::date_range`]).
pub fn generate_results<R: Rng + ?Sized>(
    template_ids: &[i64],
    spec: &DataSpecification,
    today: NaiveDate,
    rng: &mut R,
) -> JobResults {
    let file_types = spec.eligible_file_types();
    let dates = spec.date_range(today);
    let num_days = dates.num_days();

    generate_with(template_ids, rng, |rng| {
        let file_type = file_types
            .choose(rng)
            .copied()
            .unwrap_or(FileType::Pdf);
        let created_at = dates.midnight_at(rng.gen_range(0..num_days));
        Some(SampleDetail {
            created_at,
            file_type,
        })
    })
}

/// Generate results without the `created_at`/`file_type` extension.
pub fn generate_plain_results<R: Rng + ?Sized>(template_ids: &[i64], rng: &mut R) -> JobResults {
    generate_with(template_ids, rng, |_| None)
}

fn generate_with<R, F>(template_ids: &[i64], rng: &mut R, mut detail: F) -> JobResults
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Option<SampleDetail>,
{
    let mut next_sample_id: u64 = 1;
    let mut results_per_template = Vec::with_capacity(template_ids.len());

    for &template_id in template_ids {
        let num_samples = rng.gen_range(SAMPLES_PER_TEMPLATE.0..=SAMPLES_PER_TEMPLATE.1);
        let mut sample_results = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            let score: f64 = rng.r#gen();
            sample_results.push(SampleResult {
                sample_id: next_sample_id,
                score,
                detail: detail(rng),
            });
            next_sample_id += 1;
        }
        results_per_template.push(TemplateResult {
            template_id,
            sample_results,
        });
    }

    JobResults {
        results_per_template,
        total_run_time: rng.gen_range(RUN_TIME_MS.0..=RUN_TIME_MS.1),
    }
}
