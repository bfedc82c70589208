//! # tm-core
//!
//! Core types for the template matching API.
//!
//! This crate provides the foundational types shared across all `tm-*` crates:
//! - Entity structs for workspaces, document templates and matching jobs
//! - `FileType` and `JobState` enums
//! - The validated `DataSpecification` filter
//! - Synthetic result generation and mock job submission
//! - Cross-cutting error types
//! - API response types

pub mod data_spec;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod generator;
pub mod responses;
pub mod results;
