//! Synthetic job result shapes.
//!
//! These values exist only in responses; nothing here is persisted.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FileType;

/// One scored sample for a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SampleResult {
    pub sample_id: u64,
    /// Match score in `[0, 1]`.
    pub score: f64,
    /// Present when results were generated against a data specification.
    #[serde(flatten)]
    pub detail: Option<SampleDetail>,
}

/// Extension fields of a sample generated against a data specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SampleDetail {
    /// Midnight of the day the sample was created.
    pub created_at: NaiveDateTime,
    pub file_type: FileType,
}

/// All samples matched against one document template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TemplateResult {
    pub template_id: i64,
    pub sample_results: Vec<SampleResult>,
}

/// Results of a template matching job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JobResults {
    pub results_per_template: Vec<TemplateResult>,
    /// Simulated run time in milliseconds.
    pub total_run_time: u64,
}

impl JobResults {
    /// Iterate over every sample across all templates, in generation order.
    pub fn samples(&self) -> impl Iterator<Item = &SampleResult> {
        self.results_per_template
            .iter()
            .flat_map(|template| template.sample_results.iter())
    }

    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.results_per_template
            .iter()
            .map(|template| template.sample_results.len())
            .sum()
    }
}
