use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{MatchedPath, State},
    http::{HeaderValue, StatusCode, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    auth::{self, PendingNotice},
    config::AppConfig,
    guard,
    models::{DenialNotice, NavigationDecision, NavigationRequest, NavigationResponse, RouteInfo},
    routes::RouteTable,
    session::ClientSession,
    views::{PageModel, View, render_shell},
};

// --- Page Handlers ---

/// render_page
///
/// [Page Route] Serves the HTML shell for a table route. Runs behind the guard layer,
/// so reaching this handler means navigation was allowed. A notice left by an earlier
/// denial is rendered once and then cleared.
pub async fn render_page(
    State(state): State<AppState>,
    matched: MatchedPath,
    uri: Uri,
    PendingNotice(notice): PendingNotice,
) -> Response {
    let Some(route) = state.routes.by_mount_path(matched.as_str()) else {
        // Every mounted path comes from the table.
        return not_found_page(&state.config, notice);
    };

    let params = route.pattern().matches(uri.path()).unwrap_or_default();
    let page = PageModel {
        app_title: &state.config.app_title,
        view: route.view(),
        route_name: Some(route.name()),
        params: &params,
        notice,
    };

    with_notice_consumed(Html(render_shell(&page)).into_response(), notice)
}

/// fallback
///
/// [Page Route] Anything the router did not match exactly. A path that the route table
/// still resolves (different letter case, trailing slash) is redirected to its declared
/// spelling so the guard layer sees it; everything else gets the not-found view.
pub async fn fallback(
    State(routes): State<Arc<RouteTable>>,
    State(config): State<AppConfig>,
    uri: Uri,
    PendingNotice(notice): PendingNotice,
) -> Response {
    if let Some(matched) = routes.resolve(uri.path()) {
        let canonical = matched.canonical_path();
        if canonical != uri.path() {
            tracing::debug!(from = %uri.path(), to = %canonical, "Redirecting to canonical path");
            let target = match uri.query() {
                Some(query) => format!("{canonical}?{query}"),
                None => canonical,
            };
            return Redirect::permanent(&target).into_response();
        }
    }

    not_found_page(&config, notice)
}

fn not_found_page(config: &AppConfig, notice: Option<DenialNotice>) -> Response {
    let params = BTreeMap::new();
    let page = PageModel {
        app_title: &config.app_title,
        view: View::NotFound,
        route_name: None,
        params: &params,
        notice,
    };
    let response = (StatusCode::NOT_FOUND, Html(render_shell(&page))).into_response();
    with_notice_consumed(response, notice)
}

/// redirect_response
///
/// Turns a guard redirect into `303 See Other`. A denial notice is handed to the next
/// page through the one-shot notice cookie; the redirect does not wait for it to be
/// acknowledged.
pub fn redirect_response(config: &AppConfig, to: &str, notice: Option<DenialNotice>) -> Response {
    let mut response = Redirect::to(to).into_response();
    if let Some(cookie) = notice.and_then(|n| auth::notice_cookie(n, config.notice_max_age_secs)) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

fn with_notice_consumed(mut response: Response, notice: Option<DenialNotice>) -> Response {
    if notice.is_some() {
        if let Some(clear) = auth::clear_notice_cookie() {
            response.headers_mut().append(header::SET_COOKIE, clear);
        }
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    response
}

// --- API Handlers ---

/// get_routes
///
/// [API Route] Lists the page route table in declaration order.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Route table", body = [RouteInfo]))
)]
pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteInfo>> {
    Json(state.routes.iter().map(|route| route.info()).collect())
}

/// evaluate_navigation
///
/// [API Route] Evaluates one navigation against the supplied persisted state without
/// following redirects. Unmatched paths report the not-found view, which is public.
#[utoipa::path(
    post,
    path = "/api/navigation",
    request_body = NavigationRequest,
    responses((status = 200, description = "Guard decision", body = NavigationResponse))
)]
pub async fn evaluate_navigation(
    State(state): State<AppState>,
    Json(payload): Json<NavigationRequest>,
) -> Json<NavigationResponse> {
    let session = ClientSession::from_raw(payload.token, payload.user.as_deref());

    let response = match state.routes.resolve(&payload.path) {
        Some(matched) => {
            let decision = guard::check(matched.route.access(), &session);
            NavigationResponse {
                route: Some(matched.route.name().to_string()),
                view: matched.route.view().component().to_string(),
                notice_message: decision.notice().map(|n| n.message().to_string()),
                params: matched.params,
                decision,
            }
        }
        None => NavigationResponse {
            route: None,
            view: View::NotFound.component().to_string(),
            params: BTreeMap::new(),
            decision: NavigationDecision::Allow,
            notice_message: None,
        },
    };

    Json(response)
}

/// health
///
/// [API Route] Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}
