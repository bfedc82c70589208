use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::JobState;

/// A unit of mocked matching work, as stored.
///
/// `job_state` and `job_id` stay unset until the job is first submitted.
/// `document_template_ids` keeps the order the templates were given in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TemplateMatchingJob {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub job_state: Option<JobState>,
    pub job_id: Option<String>,
    pub workspace_id: Option<i64>,
    pub document_template_ids: Vec<i64>,
}

impl TemplateMatchingJob {
    /// Whether results may be generated for this job right now.
    #[must_use]
    pub fn has_results(&self) -> bool {
        self.job_state.is_some_and(JobState::has_results)
    }
}
