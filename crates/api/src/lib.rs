//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for the obligation dashboard (overview, detail, CSV export)
//! - Mapping of application errors to JSON error responses
//! - Response types

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use rao_source::RecordSource;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where budget items and obligations are fetched from.
    pub source: Arc<dyn RecordSource>,
}

impl AppState {
    /// Creates state over a record source.
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
