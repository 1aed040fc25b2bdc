//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check (route table size, version)
//! - anything else - Converted to a gateway envelope and resolved against the
//!   route table
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{gateway_handler, health_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Router with every endpoint and the tracing layer, without path normalization.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(gateway_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
