use axum::http::{HeaderMap, header};
use cookie::Cookie;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{error::SessionError, models::Role};

/// Key holding the opaque authentication token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized user record.
pub const USER_KEY: &str = "edulink_user";

// 1. SessionStore Contract
/// SessionStore
///
/// Read-only view of the persisted client key-value store. The login and logout
/// flows own writing; the shell only ever reads.
///
/// Reads are synchronous. Implementations must return the current value on every
/// call so each navigation sees a fresh snapshot.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }
}

// 2. Cookie-backed store (Shell server)
/// CookieSessionStore
///
/// The persisted client state as it arrives with an HTTP request: one cookie per key,
/// values percent-encoded. Cookies that fail to parse are skipped.
#[derive(Debug, Clone, Default)]
pub struct CookieSessionStore {
    items: HashMap<String, String>,
}

impl CookieSessionStore {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let items = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|raw| Cookie::split_parse_encoded(raw.to_owned()))
            .filter_map(Result::ok)
            .map(|cookie| (cookie.name().to_string(), cookie.value().to_string()))
            .collect();

        Self { items }
    }
}

impl SessionStore for CookieSessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}

// 3. In-memory store (Navigator, tests)
/// MemorySessionStore
///
/// A plain map standing in for the browser store. Writable so tests and embedding
/// code can play the part of the login/logout flows.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    items: HashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    pub fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.set_item(TOKEN_KEY, token);
        self
    }

    /// Stores a user record carrying only the given role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.set_item(USER_KEY, format!(r#"{{"role":"{}"}}"#, role.as_str()));
        self
    }

    pub fn with_raw_user(mut self, raw: &str) -> Self {
        self.set_item(USER_KEY, raw);
        self
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}

// --- Session Snapshot ---

/// UserRecord
///
/// The stored user object. Only `role` is interpreted; other fields are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// ClientSession
///
/// A snapshot of the persisted client state taken for one navigation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientSession {
    pub token: Option<String>,
    pub user: UserRecord,
}

impl ClientSession {
    /// The unauthenticated, no-role session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// load
    ///
    /// Reads both keys from the store. A malformed user record is logged and
    /// replaced by the empty record, leaving the session without a role.
    pub fn load(store: &impl SessionStore) -> Self {
        let token = store.get_item(TOKEN_KEY);
        let raw_user = store.get_item(USER_KEY);
        Self::from_raw(token, raw_user.as_deref())
    }

    /// Builds a session from raw stored values.
    pub fn from_raw(token: Option<String>, raw_user: Option<&str>) -> Self {
        match parse_user(raw_user) {
            Ok(user) => Self { token, user },
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed persisted user record");
                Self {
                    token,
                    user: UserRecord::default(),
                }
            }
        }
    }

    /// True when a non-empty token is stored.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn role(&self) -> Option<Role> {
        self.user.role.as_deref().and_then(Role::parse)
    }
}

/// parse_user
///
/// An absent or empty value is the empty record. Anything that is not a JSON object
/// (including `null` and arrays) is an error.
pub fn parse_user(raw: Option<&str>) -> Result<UserRecord, SessionError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(UserRecord::default()),
        Some(raw) => Ok(serde_json::from_str(raw)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_absent_user_is_empty_record() {
        let session = ClientSession::load(&MemorySessionStore::new().with_token("abc"));
        assert!(session.has_token());
        assert_eq!(session.user, UserRecord::default());
        assert_eq!(session.role(), None);
    }

    #[test]
    fn test_empty_token_is_not_a_token() {
        let session = ClientSession::load(&MemorySessionStore::new().with_token(""));
        assert!(!session.has_token());
    }

    #[test]
    fn test_role_is_read_from_user_record() {
        let store = MemorySessionStore::new()
            .with_token("abc")
            .with_raw_user(r#"{"id":7,"email":"t@edulink.io","role":"TEACHER"}"#);
        let session = ClientSession::load(&store);
        assert_eq!(session.role(), Some(Role::Teacher));
        assert_eq!(session.user.extra.get("id"), Some(&serde_json::json!(7)));
    }

    #[test]
    fn test_unknown_role_value_has_no_role() {
        let store = MemorySessionStore::new().with_raw_user(r#"{"role":"admin"}"#);
        assert_eq!(ClientSession::load(&store).role(), None);
    }

    #[test]
    fn test_malformed_user_fails_open() {
        for raw in ["{not json", "null", "[1,2]", r#""ADMIN""#, r#"{"role":5}"#] {
            let store = MemorySessionStore::new().with_token("abc").with_raw_user(raw);
            let session = ClientSession::load(&store);
            assert_eq!(session.user, UserRecord::default(), "raw user: {raw}");
            assert_eq!(session.role(), None);
            assert!(session.has_token());
        }
    }

    #[test]
    fn test_parse_user_reports_error() {
        assert!(parse_user(Some("{oops")).is_err());
        assert!(parse_user(Some("   ")).is_ok());
    }

    #[test]
    fn test_cookie_store_decodes_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("token=abc; edulink_user=%7B%22role%22%3A%22ADMIN%22%7D"),
        );
        let store = CookieSessionStore::from_headers(&headers);
        assert_eq!(store.get_item(TOKEN_KEY).as_deref(), Some("abc"));

        let session = ClientSession::load(&store);
        assert_eq!(session.role(), Some(Role::Admin));
    }

    #[test]
    fn test_cookie_store_without_cookies_is_anonymous() {
        let store = CookieSessionStore::from_headers(&HeaderMap::new());
        assert_eq!(ClientSession::load(&store), ClientSession::anonymous());
    }
}
