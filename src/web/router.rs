//! Router configuration for the web API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    connect, disconnect, file_data, get_file, list_files, me, publish, register, stats, status,
    unpublish, upload, AppState,
};
use super::middleware::{create_cors_layer, inject_auth_gate};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/users", post(register))
        .route("/users/me", get(me))
        .route("/connect", get(connect))
        .route("/disconnect", get(disconnect));

    let file_routes = Router::new()
        .route("/files", post(upload).get(list_files))
        .route("/files/:id", get(get_file))
        .route("/files/:id/publish", put(publish))
        .route("/files/:id/unpublish", put(unpublish))
        .route("/files/:id/data", get(file_data));

    let health_routes = Router::new()
        .route("/status", get(status))
        .route("/stats", get(stats));

    let gate = Arc::new(app_state.gate.clone());

    Router::new()
        .merge(auth_routes)
        .merge(file_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let gate = gate.clone();
                    inject_auth_gate(gate, req, next)
                })),
        )
        .with_state(app_state)
}
