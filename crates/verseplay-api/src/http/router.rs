//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Word-chain
        .route("/wordchain", post(handlers::wordchain::create))
        .route("/wordchain/{id}/submit", post(handlers::wordchain::submit))
        .route(
            "/wordchain/{id}/submit-audio",
            post(handlers::wordchain::submit_audio),
        )
        // Nine-grid quiz
        .route("/quiz", post(handlers::quiz::create))
        .route("/quiz/{id}/submit", post(handlers::quiz::submit))
        .route("/quiz/{id}/submit-audio", post(handlers::quiz::submit_audio))
        // Recitation
        .route("/recitation", post(handlers::recitation::create))
        .route("/recitation/{id}/submit", post(handlers::recitation::submit))
        .route(
            "/recitation/{id}/submit-audio",
            post(handlers::recitation::submit_audio),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
