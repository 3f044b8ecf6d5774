use axum::{
    Router,
    extract::{FromRef, MatchedPath, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core shell logic: session snapshot, guard, route table, in-process navigation.
pub mod error;
pub mod guard;
pub mod models;
pub mod navigator;
pub mod session;
pub mod views;

// HTTP surface: session extraction, handlers, configuration.
pub mod auth;
pub mod config;
pub mod handlers;

// Route table declarations (Public, Admin, Teacher) and the API router.
pub mod routes;
use routes::api;

// --- Public Re-exports ---

pub use config::AppConfig;
pub use models::{DenialNotice, NavigationDecision, Role};
pub use navigator::{Navigation, Navigator};
pub use routes::{RouteTable, route_table};
pub use session::{ClientSession, MemorySessionStore, SessionStore};

/// ApiDoc
///
/// OpenAPI document for the JSON endpoints, served at `/api-docs/openapi.json`.
/// Page routes return HTML and are not part of it.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::get_routes, handlers::evaluate_navigation),
    components(
        schemas(
            models::Role, models::AccessMeta, models::DenialNotice,
            models::NavigationDecision, models::RouteInfo,
            models::NavigationRequest, models::NavigationResponse,
        )
    ),
    tags(
        (name = "edulink-shell", description = "EduLink page shell")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared by every request: the immutable route table and configuration.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub config: AppConfig,
}

impl FromRef<AppState> for Arc<RouteTable> {
    fn from_ref(app_state: &AppState) -> Arc<RouteTable> {
        app_state.routes.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// guard_middleware
///
/// Route layer in front of every page route. Looks up the matched table route and runs
/// the navigation guard against the session carried by the request's cookies. On a
/// redirect the page handler is never reached.
async fn guard_middleware(
    State(state): State<AppState>,
    matched: MatchedPath,
    session: ClientSession,
    request: Request,
    next: Next,
) -> Response {
    let Some(route) = state.routes.by_mount_path(matched.as_str()) else {
        return next.run(request).await;
    };

    match guard::check(route.access(), &session) {
        NavigationDecision::Allow => {
            tracing::debug!(route = route.name(), "Navigation allowed");
            next.run(request).await
        }
        NavigationDecision::Redirect { to, notice } => {
            tracing::debug!(route = route.name(), to = %to, notice = ?notice, "Navigation redirected");
            handlers::redirect_response(&state.config, &to, notice)
        }
    }
}

/// create_router
///
/// Mounts every table route as a guarded page, the unguarded API next to them, and the
/// not-found fallback, then wraps everything in the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    // Page Routes: one GET per table entry, all behind the guard.
    let pages = state
        .routes
        .iter()
        .fold(Router::<AppState>::new(), |router, route| {
            router.route(&route.pattern().mount_path(), get(handlers::render_page))
        })
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard_middleware,
        ));

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api::api_routes())
        .merge(pages)
        .fallback(handlers::fallback)
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for one HTTP request, correlated by the generated `x-request-id`.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
