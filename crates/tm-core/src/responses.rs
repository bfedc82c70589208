//! API response types returned as JSON by the HTTP layer.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{DocumentTemplate, TemplateMatchingJob, Workspace};
use crate::enums::JobState;

/// A job with its workspace and templates expanded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct JobDetail {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub job_state: Option<JobState>,
    pub job_id: Option<String>,
    pub workspace: Option<Workspace>,
    pub document_templates: Vec<DocumentTemplate>,
}

impl JobDetail {
    /// Combine a stored job with its resolved relations.
    #[must_use]
    pub fn new(
        job: TemplateMatchingJob,
        workspace: Option<Workspace>,
        document_templates: Vec<DocumentTemplate>,
    ) -> Self {
        Self {
            id: job.id,
            created_at: job.created_at,
            job_state: job.job_state,
            job_id: job.job_id,
            workspace,
            document_templates,
        }
    }
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
