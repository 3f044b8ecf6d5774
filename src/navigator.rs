use std::{collections::BTreeMap, sync::Arc};

use crate::{
    error::NavigationError,
    guard,
    models::{DenialNotice, NavigationDecision},
    routes::RouteTable,
    session::{ClientSession, SessionStore},
    views::View,
};

/// Upper bound on guard redirects followed for one navigation. The shipped table
/// needs at most one; anything longer is a loop.
const MAX_REDIRECTS: usize = 4;

/// Navigation
///
/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The path as requested, or the redirect target when the guard redirected.
    pub location: String,
    /// `None` for the not-found view.
    pub route: Option<String>,
    pub view: View,
    pub params: BTreeMap<String, String>,
    /// Present when a privilege check redirected this navigation.
    pub notice: Option<DenialNotice>,
    /// The originally requested path when the guard redirected.
    pub redirected_from: Option<String>,
}

/// Navigator
///
/// The in-process counterpart of the browser router: resolves paths against the route
/// table, runs the guard against a fresh session snapshot for every attempt, and keeps
/// the history of where navigation landed.
///
/// Redirects replace the pending navigation, so only final locations enter history.
pub struct Navigator<S> {
    routes: Arc<RouteTable>,
    store: S,
    history: Vec<Navigation>,
}

impl<S: SessionStore> Navigator<S> {
    pub fn new(routes: Arc<RouteTable>, store: S) -> Self {
        Self {
            routes,
            store,
            history: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The store, for code acting as the login/logout flow.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn current(&self) -> Option<&Navigation> {
        self.history.last()
    }

    pub fn history(&self) -> &[Navigation] {
        &self.history
    }

    /// navigate
    ///
    /// Navigates to a concrete path. A newer navigation always supersedes the
    /// previous target.
    pub fn navigate(&mut self, path: &str) -> Result<&Navigation, NavigationError> {
        let navigation = self.resolve(path)?;
        let index = self.history.len();
        self.history.push(navigation);
        Ok(&self.history[index])
    }

    /// Navigates by route name, filling in path parameters.
    pub fn navigate_named(
        &mut self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<&Navigation, NavigationError> {
        let path = self.routes.href(name, params)?;
        self.navigate(&path)
    }

    /// back
    ///
    /// Leaves the current entry and navigates to the previous one again, guard
    /// included, since the session may have changed in between. Returns `Ok(None)`
    /// when there is nothing to go back to.
    pub fn back(&mut self) -> Result<Option<&Navigation>, NavigationError> {
        if self.history.len() < 2 {
            return Ok(None);
        }
        self.history.pop();
        let previous = self
            .history
            .pop()
            .map(|entry| entry.location)
            .unwrap_or_default();
        self.navigate(&previous).map(Some)
    }

    fn resolve(&self, path: &str) -> Result<Navigation, NavigationError> {
        let mut target = path.to_string();
        let mut notice = None;

        for _ in 0..=MAX_REDIRECTS {
            let Some(matched) = self.routes.resolve(&target) else {
                tracing::debug!(path = %target, "No route matched, using not-found view");
                return Ok(Navigation {
                    redirected_from: redirected_from(path, &target),
                    location: target,
                    route: None,
                    view: View::NotFound,
                    params: BTreeMap::new(),
                    notice,
                });
            };

            let session = ClientSession::load(&self.store);
            match guard::check(matched.route.access(), &session) {
                NavigationDecision::Allow => {
                    tracing::debug!(route = matched.route.name(), "Navigation allowed");
                    return Ok(Navigation {
                        redirected_from: redirected_from(path, &target),
                        route: Some(matched.route.name().to_string()),
                        view: matched.route.view(),
                        params: matched.params,
                        location: target,
                        notice,
                    });
                }
                NavigationDecision::Redirect { to, notice: denial } => {
                    tracing::debug!(
                        route = matched.route.name(),
                        to = %to,
                        notice = ?denial,
                        "Navigation redirected"
                    );
                    notice = denial.or(notice);
                    target = to;
                }
            }
        }

        Err(NavigationError::RedirectLoop(path.to_string()))
    }
}

fn redirected_from(requested: &str, landed: &str) -> Option<String> {
    (requested != landed).then(|| requested.to_string())
}
