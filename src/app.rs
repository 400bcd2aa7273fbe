use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/geo/summary", get(handlers::get_summary))
        .route("/api/health", get(handlers::health))
        .route("/api/ready", get(handlers::ready))
        .route("/api/live", get(handlers::live))
        .route("/api/ping", get(handlers::ping))
        .with_state(state)
}
