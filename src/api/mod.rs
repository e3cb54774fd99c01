mod handlers;
mod models;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::engine::Engine;

pub use handlers::{analyze, health, not_found};
pub use models::{AnalyzeRequest, AnalyzeResponse, AstroData, ErrorResponse, HealthResponse};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn Engine>,
}

/// Any origin, method, and header. The frontend is served from elsewhere.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
