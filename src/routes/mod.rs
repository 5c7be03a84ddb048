//! API Routes
//!
//! - `GET /` - liveness message
//! - `POST /upload` - document upload and text extraction

pub mod files;
pub mod health;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use crate::middleware::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(health::router())
        .merge(files::router())
        .layer(DefaultBodyLimit::max(state.config.storage.max_upload_bytes))
        .layer(trace_layer)
        .layer(cors_layer(&state.config.server.cors_allowed_origins))
        .with_state(state)
}
