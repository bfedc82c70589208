//! Route handlers, one module per resource.

pub mod document_template;
pub mod health;
pub mod job;
pub mod workspace;
