//! HTTP request handlers for the triage service.
//!
//! Serves the upload form and the `/processar` classification endpoint
//! using axum.

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, warn};
use triagem_domain::traits::TextCompletionBackend;
use triagem_domain::{EmailSubmission, UploadedFile};
use triagem_pipeline::{Classifier, PipelineError};

/// Form field carrying pasted email text
pub const FIELD_TEXT: &str = "email_texto";

/// Form field carrying the uploaded email file
pub const FIELD_FILE: &str = "email_arquivo";

const INDEX_HTML: &str = include_str!("../static/index.html");
const SCRIPT_JS: &str = include_str!("../static/script.js");

/// Shared application state
pub struct AppState<B> {
    /// Classification pipeline (immutable, shared across requests)
    pub classifier: Arc<Classifier<B>>,
    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

impl<B> AppState<B> {
    /// Create application state around a classifier
    pub fn new(classifier: Classifier<B>, max_upload_bytes: usize) -> Self {
        Self {
            classifier: Arc::new(classifier),
            max_upload_bytes,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Configured provider
    pub provider: String,
    /// Configured model
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub erro: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Classification pipeline error
    Pipeline(PipelineError),
    /// The multipart body could not be read
    Multipart {
        /// Status suggested by the multipart parser (400, 413, ...)
        status: StatusCode,
        /// Parser message
        message: String,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Pipeline(e) => {
                let status = if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, e.message().to_string())
            }
            AppError::Multipart { status, message } => (status, message),
        };

        let body = Json(ErrorResponse { erro: message });
        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        warn!(error = %e, "Failed to read multipart body");
        AppError::Multipart {
            status: e.status(),
            message: format!("Requisição inválida: {}", e.body_text()),
        }
    }
}

/// GET / - Upload form
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/script.js - Form behaviour
async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

/// POST /processar - Classify one email
///
/// Returns the validated classification JSON verbatim, or `{"erro": ...}`.
async fn processar<B>(
    State(state): State<AppState<B>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError>
where
    B: TextCompletionBackend + Send + Sync + 'static,
    B::Error: Display,
{
    let submission = match multipart {
        Ok(multipart) => read_submission(multipart).await?,
        Err(rejection) => {
            // Not a multipart form: there are no fields to read
            warn!(error = %rejection, "Request body is not multipart/form-data");
            EmailSubmission::default()
        }
    };

    let outcome = state.classifier.classify(submission).await.map_err(|e| {
        info!(kind = e.kind(), "Classification request failed");
        AppError::from(e)
    })?;

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        outcome.json,
    )
        .into_response())
}

/// Collect the email fields of a multipart form; other fields are ignored
async fn read_submission(mut multipart: Multipart) -> Result<EmailSubmission, AppError> {
    let mut submission = EmailSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some(FIELD_TEXT) => {
                submission.raw_text = Some(field.text().await?);
            }
            Some(FIELD_FILE) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                submission.uploaded_file = Some(UploadedFile::new(filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// GET /health - Liveness and backend identification
async fn health_check<B>(State(state): State<AppState<B>>) -> Json<HealthCheckResponse>
where
    B: TextCompletionBackend + Send + Sync + 'static,
{
    let backend = state.classifier.backend();
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        provider: backend.name().to_string(),
        model: backend.model().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<B>(state: AppState<B>) -> AxumRouter
where
    B: TextCompletionBackend + Send + Sync + 'static,
    B::Error: Display,
{
    let max_upload_bytes = state.max_upload_bytes;
    AxumRouter::new()
        .route("/", get(index))
        .route("/static/script.js", get(script))
        .route("/processar", post(processar::<B>))
        .route("/health", get(health_check::<B>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
