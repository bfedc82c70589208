//! Repository modules implementing CRUD operations for all stored entities.
//!
//! Each module adds methods to `TmService` via `impl TmService` blocks.

pub mod document_template;
pub mod job;
pub mod workspace;
