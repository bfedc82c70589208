//! Workspace update builder.

use serde::Serialize;
use tm_core::data_spec::DataSpecification;

/// Partial workspace update. `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkspaceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_specification: Option<DataSpecification>,
}

impl WorkspaceUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.data_specification.is_none()
    }
}

pub struct WorkspaceUpdateBuilder(WorkspaceUpdate);

impl WorkspaceUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(WorkspaceUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn data_specification(mut self, spec: DataSpecification) -> Self {
        self.0.data_specification = Some(spec);
        self
    }

    #[must_use]
    pub fn build(self) -> WorkspaceUpdate {
        self.0
    }
}

impl Default for WorkspaceUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
