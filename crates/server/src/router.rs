//! HTTP router construction.
//!
//! Assembles the submitter API and the worker-facing task endpoints into a single `Router`.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::api;
use crate::state::SharedState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health))
        // Submitter API
        .route("/api/v1/calculate", post(api::calculate))
        .route("/api/v1/expressions", get(api::list_expressions))
        .route("/api/v1/expressions/{id}", get(api::get_expression))
        // Worker pull/push
        .route(
            "/internal/task",
            get(api::claim_task).post(api::submit_task_result),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            warn!("Invalid CORS_ORIGIN {:?}, allowing any origin", origin);
            CorsLayer::permissive()
        }
    }
}
