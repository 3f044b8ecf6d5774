use thiserror::Error;

/// Problems found while building the route table. All of them are programming
/// errors in the table declaration and surface at start-up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },

    #[error("Duplicate route path '{path}' (conflicts with '{existing}')")]
    DuplicatePath { path: String, existing: String },

    #[error("Duplicate route name '{0}'")]
    DuplicateName(String),
}

/// Failure to turn a route name and parameters back into a concrete path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HrefError {
    #[error("Unknown route name '{0}'")]
    UnknownRoute(String),

    #[error("Missing parameter '{param}' for route '{route}'")]
    MissingParameter { route: String, param: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Redirect loop while navigating to '{0}'")]
    RedirectLoop(String),

    #[error(transparent)]
    Href(#[from] HrefError),
}

/// A stored user record that could not be read. Never leaves the session module
/// as a failure; the session falls back to an empty record.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Malformed user record: {0}")]
    MalformedUser(#[from] serde_json::Error),
}
