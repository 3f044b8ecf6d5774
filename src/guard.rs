use crate::{
    models::{AccessMeta, DenialNotice, NavigationDecision, Role},
    session::ClientSession,
};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where visitors without the required role are sent, with a denial notice.
pub const HOME_PATH: &str = "/";

/// check
///
/// Decides whether a navigation to a route with the given access metadata may proceed.
/// The checks run in a fixed order and the first one that fails wins:
///
/// 1. `requires_auth` without a non-empty token → login page.
/// 2. `requires_admin` without role `ADMIN` → home page + admin notice.
/// 3. `requires_teacher` without role `TEACHER` → home page + teacher notice.
///
/// Pure: no I/O, no mutation of the session or the route table.
pub fn check(access: &AccessMeta, session: &ClientSession) -> NavigationDecision {
    if access.requires_auth && !session.has_token() {
        return NavigationDecision::Redirect {
            to: LOGIN_PATH.to_string(),
            notice: None,
        };
    }

    let role = session.role();

    if access.requires_admin && role != Some(Role::Admin) {
        return deny(DenialNotice::AdminRequired);
    }

    if access.requires_teacher && role != Some(Role::Teacher) {
        return deny(DenialNotice::TeacherRequired);
    }

    NavigationDecision::Allow
}

fn deny(notice: DenialNotice) -> NavigationDecision {
    NavigationDecision::Redirect {
        to: HOME_PATH.to_string(),
        notice: Some(notice),
    }
}
