use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, request::Parts},
};
use cookie::{Cookie, SameSite, time::Duration};

use crate::{
    models::DenialNotice,
    session::{ClientSession, CookieSessionStore, SessionStore},
};

/// Cookie carrying a denial notice across the redirect to the home page.
pub const NOTICE_COOKIE: &str = "edulink_notice";

/// ClientSession Extractor Implementation
///
/// Builds the session snapshot for one request from its cookies. Never rejects:
/// missing or malformed state is simply an unauthenticated session, and the guard
/// decides what that means for the requested page.
impl<S> FromRequestParts<S> for ClientSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let store = CookieSessionStore::from_headers(&parts.headers);
        Ok(ClientSession::load(&store))
    }
}

/// PendingNotice
///
/// The denial notice left behind by a previous redirect, if any. Unknown codes are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNotice(pub Option<DenialNotice>);

impl PendingNotice {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let notice = CookieSessionStore::from_headers(headers)
            .get_item(NOTICE_COOKIE)
            .and_then(|code| DenialNotice::from_code(&code));
        Self(notice)
    }
}

impl<S> FromRequestParts<S> for PendingNotice
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(PendingNotice::from_headers(&parts.headers))
    }
}

/// Set-Cookie value that stores a notice for the next rendered page.
pub fn notice_cookie(notice: DenialNotice, max_age_secs: i64) -> Option<HeaderValue> {
    let cookie = Cookie::build((NOTICE_COOKIE, notice.code()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .build();
    HeaderValue::from_str(&cookie.to_string()).ok()
}

/// Set-Cookie value that clears a consumed notice.
pub fn clear_notice_cookie() -> Option<HeaderValue> {
    let mut cookie = Cookie::build((NOTICE_COOKIE, "")).path("/").build();
    cookie.make_removal();
    HeaderValue::from_str(&cookie.to_string()).ok()
}
