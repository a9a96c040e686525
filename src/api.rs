//! HTTP surface for Docsum.
//!
//! This module exposes a compact Axum router with a handful of endpoints:
//!
//! - `GET /` – Homepage greeting, a JSON hello-world.
//! - `GET /health` – Liveness probe; always 200, with a message reflecting
//!   whether the summarization model came up.
//! - `GET /metrics` – Observe upload/summary counters.
//! - `GET /public/static/{filename}` – Static assets served from the
//!   configured directory.
//! - `POST /upload` – Accept a multipart document upload, run it through the
//!   summarization pipeline, and return `{"summary": "..."}`.
//!
//! Validation failures (missing file part, empty filename, unsupported
//! extension) map to 400 with the message in `{"error": ...}`; every
//! processing failure maps to 500 with its message surfaced verbatim.

use crate::config::get_config;
use crate::extract::DocumentFormat;
use crate::pipeline::{PipelineError, SummarizeApi};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Build the HTTP router exposing the upload and observability surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: SummarizeApi + 'static,
{
    Router::new()
        .route("/", get(home))
        .route("/health", get(health::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .route("/upload", post(upload_document::<S>))
        .nest_service(
            "/public/static",
            ServeDir::new(&get_config().static_dir),
        )
        // The original service never capped request size; keep that behavior
        // instead of inheriting the framework default.
        .layer(DefaultBodyLimit::disable())
        .with_state(service)
}

/// Homepage greeting.
async fn home() -> Json<serde_json::Value> {
    tracing::info!("Home route accessed");
    Json(json!({ "message": "Hello, World!" }))
}

/// Response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// Liveness probe. Reports 200 whether or not the model initialized; the
/// message tells the two states apart.
async fn health<S>(State(service): State<Arc<S>>) -> Json<HealthResponse>
where
    S: SummarizeApi,
{
    let message = if service.model_ready() {
        "Summarization service is running"
    } else {
        "Summarization model failed to initialize; uploads will be rejected"
    };
    Json(HealthResponse {
        status: "healthy",
        message,
    })
}

/// Return a concise metrics snapshot with upload/summary counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<crate::metrics::MetricsSnapshot>
where
    S: SummarizeApi,
{
    Json(service.metrics_snapshot())
}

/// Success response for the `POST /upload` endpoint.
#[derive(Serialize)]
struct UploadResponse {
    /// Generated abstractive summary of the uploaded document.
    summary: String,
}

/// Accept a multipart upload, validate it, and run the summarization pipeline.
async fn upload_document<S>(
    State(service): State<Arc<S>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError>
where
    S: SummarizeApi,
{
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| ApiError::Validation(error.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ApiError::Validation("No file selected".into()))?;

        let Some(format) = DocumentFormat::from_filename(&filename) else {
            return Err(ApiError::Validation("Unsupported file format".into()));
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|error| ApiError::Validation(error.to_string()))?;

        let outcome = service
            .summarize_upload(&filename, format, bytes.to_vec())
            .await?;
        tracing::info!(
            file = filename,
            summary_words = outcome.words,
            "Upload request completed"
        );
        return Ok(Json(UploadResponse {
            summary: outcome.summary,
        }));
    }

    Err(ApiError::Validation("No file part in the request".into()))
}

enum ApiError {
    /// Client fault: the request never reached the pipeline.
    Validation(String),
    /// Server fault: a pipeline stage failed.
    Pipeline(PipelineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::Pipeline(error) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(inner: PipelineError) -> Self {
        Self::Pipeline(inner)
    }
}
