//! HTTP request handlers for the SpecDraft server.
//!
//! Implements session issuance, the generation endpoint, the listing
//! surface, and a health check using axum.

use crate::auth::{AuthError, AuthGate};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use specdraft_domain::traits::{CompletionProvider, SpecStore};
use specdraft_domain::{
    GenerationFailure, RequirementInput, SpecRecord, SpecificationDocument, Stage, UserIdentity,
};
use specdraft_pipeline::{Generator, PersistenceCoordinator};
use specdraft_store::{FsArtifactStore, SqliteStore};
use std::sync::Arc;
use tracing::info;

/// Uploaded requirements documents can be scanned PDFs well past axum's
/// default 2 MiB body cap.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Shared application state
pub struct AppState<C: CompletionProvider> {
    /// Bearer-token auth gate
    pub auth: Arc<AuthGate>,
    /// The generation pipeline
    pub generator: Generator<C>,
    /// Detached persistence for successful results
    pub persistence: PersistenceCoordinator<FsArtifactStore, SqliteStore>,
}

impl<C: CompletionProvider> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            generator: self.generator.clone(),
            persistence: self.persistence.clone(),
        }
    }
}

/// Session issuance request
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// User to issue the token for (defaults to "default-user")
    pub user_id: Option<String>,
}

/// Session issuance response
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in_secs: u64,
}

/// Successful generation response
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Human-readable status message
    pub message: String,
    /// The generated specification
    pub data: SpecificationDocument,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Liveness status
    pub status: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Pipeline stage, when the error came from the pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Authentication failure; the pipeline is never invoked
    Auth(AuthError),
    /// Neither a file nor raw text was provided
    MissingInput,
    /// The request body could not be read
    BadRequest(String),
    /// A pipeline stage failed
    Generation(GenerationFailure),
    /// Internal server error
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Auth(e) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: e.to_string(),
                    stage: None,
                },
            ),
            AppError::MissingInput => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Must provide either a file or raw text.".to_string(),
                    stage: None,
                },
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    stage: None,
                },
            ),
            AppError::Generation(failure) => {
                // Extraction is a client-input failure; completion and
                // validation are upstream failures.
                let status = match failure.stage {
                    Stage::Extraction => StatusCode::BAD_REQUEST,
                    Stage::Completion | Stage::Validation => StatusCode::BAD_GATEWAY,
                };
                (
                    status,
                    ErrorResponse {
                        error: failure.message,
                        stage: Some(failure.stage),
                    },
                )
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: msg,
                    stage: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// POST /auth/session - issue a session token
async fn establish_session<C>(
    State(state): State<AppState<C>>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, AppError>
where
    C: CompletionProvider + Send + Sync + 'static,
{
    let user_id = request
        .user_id
        .unwrap_or_else(|| "default-user".to_string());

    let token = state.auth.generate_token(&user_id)?;

    Ok(Json(SessionResponse {
        token,
        expires_in_secs: state.auth.token_expiry_secs(),
    }))
}

/// POST /api/generate - run the generation pipeline
///
/// Accepts a multipart body with either a `file` part (.pdf parsed as PDF,
/// anything else as plain text) or a `raw_text` part. Requires a bearer
/// token. On success the structured result is returned immediately and
/// persistence is issued as a detached task.
async fn generate_spec<C>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError>
where
    C: CompletionProvider + Send + Sync + 'static,
{
    let identity = state.auth.resolve(bearer(&headers))?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut raw_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("manual_text_input.txt")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                upload = Some((filename, bytes));
            }
            Some("raw_text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                raw_text = Some(text);
            }
            _ => {}
        }
    }

    let (filename, input, archive_bytes) = match (upload, raw_text) {
        (Some((filename, bytes)), _) => {
            let input = specdraft_extract::classify_upload(&filename, bytes.clone())
                .map_err(|e| AppError::Generation(GenerationFailure::new(Stage::Extraction, e)))?;
            (filename, input, Some(bytes))
        }
        (None, Some(text)) => (
            "manual_text_input.txt".to_string(),
            RequirementInput::PlainText(text),
            None,
        ),
        (None, None) => return Err(AppError::MissingInput),
    };

    info!(user_id = %identity.user_id, filename = %filename, "generation requested");

    let spec = state
        .generator
        .generate(input)
        .await
        .map_err(AppError::Generation)?;

    // Detached persistence: the primary result is already finalized, and
    // failures here are logged by the coordinator, never surfaced.
    spawn_persistence(
        state.persistence.clone(),
        identity,
        filename,
        spec.clone(),
        archive_bytes,
    );

    Ok(Json(GenerateResponse {
        message: "Specifications generated successfully.".to_string(),
        data: spec,
    }))
}

fn spawn_persistence(
    persistence: PersistenceCoordinator<FsArtifactStore, SqliteStore>,
    identity: UserIdentity,
    filename: String,
    doc: SpecificationDocument,
    archive_bytes: Option<Vec<u8>>,
) {
    tokio::spawn(async move {
        persistence.persist(&identity, &filename, doc, archive_bytes.as_deref());
    });
}

/// GET /api/specs - list the caller's stored specifications
async fn list_specs<C>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<Vec<SpecRecord>>, AppError>
where
    C: CompletionProvider + Send + Sync + 'static,
{
    let identity = state.auth.resolve(bearer(&headers))?;

    let records = state.persistence.records();
    let store = records
        .lock()
        .map_err(|_| AppError::Internal("record store unavailable".to_string()))?;

    let rows = store
        .records_for_user(&identity.user_id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(rows))
}

/// GET /health - liveness check
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: CompletionProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/auth/session", post(establish_session::<C>))
        .route(
            "/api/generate",
            post(generate_spec::<C>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/specs", get(list_specs::<C>))
        .route("/health", get(health_check))
        .with_state(state)
}
