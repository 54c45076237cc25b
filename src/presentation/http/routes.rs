//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{authenticate, track_requests};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/guilds", guild_routes(state.clone()))
        // Health check endpoint
        .route("/health", get(handlers::health::health_check))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Guild routes
///
/// Every route passes through `authenticate`; handlers that need a caller
/// extract `AuthAccount` and reject anonymous requests.
fn guild_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::guild::list_guilds).post(handlers::guild::create_guild),
        )
        .route("/invites", get(handlers::invite::pending_invites))
        .route("/{name}", get(handlers::guild::get_guild))
        .route("/{name}/invite", post(handlers::invite::invite_player))
        .route("/{name}/accept-invite", post(handlers::invite::accept_invite))
        .route("/{name}/leave", post(handlers::membership::leave_guild))
        .route("/{name}/kick", post(handlers::membership::kick_player))
        .layer(middleware::from_fn_with_state(state, authenticate))
}
