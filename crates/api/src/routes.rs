use crate::handlers;
use crate::state::AppState;
use axum::{http::StatusCode, routing::get, Router};
use tower_http::trace::TraceLayer;

/// `GET /metrics` and nothing else; every other path is an empty 404.
pub fn create_metrics_routes(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(handlers::get_metrics))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
