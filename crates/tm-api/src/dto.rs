//! Request bodies accepted by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tm_core::data_spec::{DataSpecification, DataSpecificationInput, today};
use tm_db::repos::document_template::NewDocumentTemplate;
use tm_db::updates::workspace::{WorkspaceUpdate, WorkspaceUpdateBuilder};

use crate::error::ApiError;

const SPEC_LOC: [&str; 2] = ["body", "data_specification"];

fn validate_spec(input: DataSpecificationInput) -> Result<DataSpecification, ApiError> {
    input
        .validate_at(today())
        .map_err(|e| ApiError::data_spec(&SPEC_LOC, &e))
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceIn {
    pub name: String,
    pub data_specification: DataSpecificationInput,
}

impl WorkspaceIn {
    /// Validate the embedded data specification.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] locating the offending date fields.
    pub fn into_parts(self) -> Result<(String, DataSpecification), ApiError> {
        Ok((self.name, validate_spec(self.data_specification)?))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceUpdateIn {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data_specification: Option<DataSpecificationInput>,
}

impl TryFrom<WorkspaceUpdateIn> for WorkspaceUpdate {
    type Error = ApiError;

    fn try_from(input: WorkspaceUpdateIn) -> Result<Self, Self::Error> {
        let mut builder = WorkspaceUpdateBuilder::new();
        if let Some(name) = input.name {
            builder = builder.name(name);
        }
        if let Some(spec) = input.data_specification {
            builder = builder.data_specification(validate_spec(spec)?);
        }
        Ok(builder.build())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentTemplateIn {
    pub name: String,
    pub template_filename: String,
    pub template_file_type: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<DocumentTemplateIn> for NewDocumentTemplate {
    fn from(input: DocumentTemplateIn) -> Self {
        Self {
            name: input.name,
            template_filename: input.template_filename,
            template_file_type: input.template_file_type,
            uploaded_at: input.uploaded_at,
        }
    }
}

/// Nullable but required: the key must be present, `null` is accepted.
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// A job request. `workspace_id` must be present; it may be `null` but the
/// job is then refused.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateMatchingJobIn {
    #[serde(deserialize_with = "required_nullable")]
    pub workspace_id: Option<i64>,
    pub document_template_ids: Vec<i64>,
}
