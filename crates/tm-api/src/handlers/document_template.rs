use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tm_core::entities::DocumentTemplate;

use crate::dto::DocumentTemplateIn;
use crate::error::ApiError;
use crate::extract::{AppJson, IdPath};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentTemplate>>, ApiError> {
    Ok(Json(state.service.list_document_templates().await?))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<DocumentTemplateIn>,
) -> Result<(StatusCode, Json<DocumentTemplate>), ApiError> {
    let template = state
        .service
        .create_document_template(&body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<DocumentTemplate>, ApiError> {
    Ok(Json(state.service.get_document_template(id).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.service.delete_document_template(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
