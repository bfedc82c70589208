//! Entity structs for all template matching domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `tm-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod document_template;
mod job;
mod workspace;

pub use document_template::DocumentTemplate;
pub use job::TemplateMatchingJob;
pub use workspace::Workspace;
