use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A reference document that jobs match samples against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentTemplate {
    pub id: i64,
    pub name: String,
    pub template_filename: String,
    /// Free-form type of the uploaded file (extension or MIME type).
    pub template_file_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
