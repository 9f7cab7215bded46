//! Route definitions and router construction.
//!
//! Axum 0.8 uses brace syntax for path parameters: `{id}`.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// JSON routes, nested under `/api` by [`create_router`].
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(handlers::api::list).post(handlers::api::create))
        .route("/jobs/{id}", get(handlers::api::get))
}

/// Create the main router: browser pages, file downloads, health and the
/// JSON API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index).post(handlers::pages::submit))
        .route("/status/{id}", get(handlers::pages::status))
        .route("/download/{id}", get(handlers::pages::download))
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
