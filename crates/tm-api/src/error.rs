//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"detail": ...}`, where `detail` is either
//! a message or a list of field errors with their location in the request.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tm_core::errors::DataSpecError;
use tm_db::error::DatabaseError;

/// One invalid input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path to the field, starting with the request part (`body`, `path`).
    pub loc: Vec<String>,
    pub msg: String,
}

impl FieldError {
    #[must_use]
    pub fn new<I, S>(loc: I, msg: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            msg: msg.into(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: Detail,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("invalid request")]
    Validation(Vec<FieldError>),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error(transparent)]
    Database(DatabaseError),
}

impl ApiError {
    /// Build a 422 from a data specification failure found under `prefix`.
    #[must_use]
    pub fn data_spec(prefix: &[&str], err: &DataSpecError) -> Self {
        let msg = err.to_string();
        let fields = err
            .fields()
            .into_iter()
            .map(|field| {
                FieldError::new(
                    prefix.iter().copied().chain(std::iter::once(field)),
                    msg.clone(),
                )
            })
            .collect();
        Self::Validation(fields)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, .. } => {
                Self::NotFound(format!("{entity_type} not found"))
            }
            other => Self::Database(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                Self::UnsupportedMediaType(rejection.body_text())
            }
            _ => Self::Validation(vec![FieldError::new(["body"], rejection.body_text())]),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(vec![FieldError::new(["path", "id"], rejection.body_text())])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            Self::NotFound(msg) | Self::UnsupportedMediaType(msg) => Detail::Message(msg),
            Self::Validation(fields) => {
                tracing::warn!(?fields, "request rejected");
                Detail::Fields(fields)
            }
            Self::Database(err) => {
                tracing::error!(error = %err, "request failed");
                Detail::Message("Internal Server Error".to_string())
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
