//! Extractors whose rejections render as [`ApiError`].

use axum::extract::{FromRequest, FromRequestParts, Path};
use serde::Deserialize;

use crate::error::ApiError;

/// JSON request body. Malformed or ill-typed bodies become a 422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Integer `{id}` path segment. Non-integer ids become a 422.
#[derive(Debug, Clone, Copy, Deserialize, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct IdPath(pub i64);
