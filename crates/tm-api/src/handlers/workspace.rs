use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tm_core::entities::Workspace;
use tm_db::updates::workspace::WorkspaceUpdate;

use crate::dto::{WorkspaceIn, WorkspaceUpdateIn};
use crate::error::ApiError;
use crate::extract::{AppJson, IdPath};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Workspace>>, ApiError> {
    Ok(Json(state.service.list_workspaces().await?))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<WorkspaceIn>,
) -> Result<(StatusCode, Json<Workspace>), ApiError> {
    let (name, spec) = body.into_parts()?;
    let workspace = state.service.create_workspace(&name, &spec).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Workspace>, ApiError> {
    Ok(Json(state.service.get_workspace(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    AppJson(body): AppJson<WorkspaceUpdateIn>,
) -> Result<StatusCode, ApiError> {
    let update = WorkspaceUpdate::try_from(body)?;
    state.service.update_workspace(id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.service.delete_workspace(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
