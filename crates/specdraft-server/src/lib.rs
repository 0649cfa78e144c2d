//! SpecDraft Server
//!
//! HTTP surface for the requirement-to-specification pipeline: bearer-token
//! auth, a multipart generation endpoint, a listing surface, and a health
//! check. Each request is handled by an independent, stateless pipeline
//! invocation; persistence runs as a detached task after the response is
//! finalized.

#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod handlers;

use auth::AuthGate;
use config::ServerConfig;
use handlers::{create_router, AppState};
use specdraft_llm::{CompletionError, OllamaProvider};
use specdraft_pipeline::{Generator, PersistenceCoordinator};
use specdraft_store::{FsArtifactStore, SqliteStore, StoreError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Record store could not be opened
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Completion provider could not be built
    #[error("completion provider error: {0}")]
    Completion(#[from] CompletionError),

    /// Server binding error
    #[error("failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("server error: {0}")]
    Server(String),
}

/// Build the application state from configuration
pub fn build_state(config: &ServerConfig) -> Result<AppState<OllamaProvider>, ServerError> {
    let auth = Arc::new(AuthGate::new(&config.jwt_secret, config.token_expiry_secs));

    let provider = OllamaProvider::new(
        config.completion.endpoint.clone(),
        config.completion.config.clone(),
    )?;
    let generator = Generator::new(provider, config.pipeline.clone());

    let records = SqliteStore::new(&config.storage.database_path)?;
    let artifacts = FsArtifactStore::new(&config.storage.artifact_dir);
    let persistence = PersistenceCoordinator::new(artifacts, records);

    Ok(AppState {
        auth,
        generator,
        persistence,
    })
}

/// Start the HTTP server
///
/// Builds the provider, stores, and router from configuration, then serves
/// until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting SpecDraft server");
    info!("Bind address: {}", config.bind_addr());
    info!("Completion model: {}", config.completion.config.model);
    info!("Database: {}", config.storage.database_path);

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
