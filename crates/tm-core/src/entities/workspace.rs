use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::data_spec::DataSpecification;

/// A named container holding one data specification, under which jobs run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub data_specification: DataSpecification,
    pub created_at: DateTime<Utc>,
}
