use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// API Router Module
///
/// Endpoints that sit next to the pages and are never guarded: the front-end bundle
/// uses them to share the route table and guard logic with the shell.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers.
        .route("/health", get(handlers::health))
        // GET /api/routes
        // The page route table, including access metadata.
        .route("/api/routes", get(handlers::get_routes))
        // POST /api/navigation
        // Runs the guard for a path against the persisted state sent in the body.
        .route("/api/navigation", post(handlers::evaluate_navigation))
}
