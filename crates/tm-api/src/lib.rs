//! # tm-api
//!
//! axum HTTP layer for the template matching API.
//!
//! Routes live under `/api` plus a `/health` check. Handlers are thin: they
//! decode the request, call into [`tm_db::service::TmService`], and for job
//! results invoke the mock generator from `tm-core`. Collection routes answer
//! both with and without a trailing slash.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
mod middleware;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;

pub use error::ApiError;
pub use state::AppState;

use handlers::{document_template, health, job, workspace};

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/workspace", get(workspace::list).post(workspace::create))
        .route("/api/workspace/", get(workspace::list).post(workspace::create))
        .route(
            "/api/workspace/{id}",
            get(workspace::get)
                .patch(workspace::update)
                .delete(workspace::delete),
        )
        .route(
            "/api/document-template",
            get(document_template::list).post(document_template::create),
        )
        .route(
            "/api/document-template/",
            get(document_template::list).post(document_template::create),
        )
        .route(
            "/api/document-template/{id}",
            get(document_template::get).delete(document_template::delete),
        )
        .route("/api/template-matching-job", get(job::list).post(job::create))
        .route("/api/template-matching-job/", get(job::list).post(job::create))
        .route(
            "/api/template-matching-job/{id}",
            get(job::get).delete(job::delete),
        )
        .route("/api/template-matching-job/{id}/results", get(job::results))
        .route("/api/template-matching-job/{id}/submit", post(job::resubmit))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state)).await
}
