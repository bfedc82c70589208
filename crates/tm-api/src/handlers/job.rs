//! Template matching job routes.
//!
//! Random draws happen before the first `.await` of a handler: the thread
//! local generator must not be held across a suspension point.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tm_core::data_spec::today;
use tm_core::generator::{generate_results, submit};
use tm_core::responses::JobDetail;
use tm_core::results::JobResults;

use crate::dto::TemplateMatchingJobIn;
use crate::error::ApiError;
use crate::extract::{AppJson, IdPath};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<JobDetail>>, ApiError> {
    Ok(Json(state.service.list_job_details().await?))
}

pub async fn create(
    State(state): State<AppState>,
    AppJson(body): AppJson<TemplateMatchingJobIn>,
) -> Result<(StatusCode, Json<JobDetail>), ApiError> {
    let Some(workspace_id) = body.workspace_id else {
        return Err(ApiError::NotFound("Workspace not found".to_string()));
    };
    let submission = submit(&mut rand::thread_rng());

    let job = state
        .service
        .create_job(workspace_id, &body.document_template_ids, &submission)
        .await?;
    let detail = state.service.job_detail(job).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn get(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<JobDetail>, ApiError> {
    Ok(Json(state.service.get_job_detail(id).await?))
}

pub async fn results(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<JobResults>, ApiError> {
    let job = state.service.get_job(id).await?;
    if !job.has_results() {
        tracing::debug!(id, job_state = ?job.job_state, "results requested before success");
        return Err(ApiError::NotFound("Template matching job results not found".to_string()));
    }
    let spec = state.service.data_specification_for(job.workspace_id).await?;

    let results = generate_results(
        &job.document_template_ids,
        &spec,
        today(),
        &mut rand::thread_rng(),
    );
    tracing::debug!(
        id,
        templates = results.results_per_template.len(),
        samples = results.total_samples(),
        "results generated"
    );
    Ok(Json(results))
}

pub async fn resubmit(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    let submission = submit(&mut rand::thread_rng());
    state.service.submit_job(id, &submission).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.service.delete_job(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
