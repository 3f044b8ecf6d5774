use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Access Control Schemas ---

/// Role
///
/// The closed set of roles a stored user record can carry. Values are compared
/// exactly as stored (upper case), so `"admin"` is not `Role::Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }

    /// Parses a stored role value. Anything outside the closed set is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "TEACHER" => Some(Role::Teacher),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AccessMeta
///
/// Per-route access requirements. The all-false default is a public route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AccessMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
    pub requires_teacher: bool,
}

impl AccessMeta {
    pub fn is_public(&self) -> bool {
        !(self.requires_auth || self.requires_admin || self.requires_teacher)
    }
}

/// DenialNotice
///
/// The user-visible reason attached to a redirect caused by insufficient privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DenialNotice {
    AdminRequired,
    TeacherRequired,
}

impl DenialNotice {
    pub fn message(&self) -> &'static str {
        match self {
            DenialNotice::AdminRequired => "Access denied. Admin privileges required.",
            DenialNotice::TeacherRequired => "Access denied. Teacher privileges required.",
        }
    }

    /// Stable code used when the notice travels outside the process (cookies, JSON).
    pub fn code(&self) -> &'static str {
        match self {
            DenialNotice::AdminRequired => "admin_required",
            DenialNotice::TeacherRequired => "teacher_required",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "admin_required" => Some(DenialNotice::AdminRequired),
            "teacher_required" => Some(DenialNotice::TeacherRequired),
            _ => None,
        }
    }
}

/// NavigationDecision
///
/// Outcome of the navigation guard for a single attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum NavigationDecision {
    Allow,
    Redirect {
        to: String,
        notice: Option<DenialNotice>,
    },
}

impl NavigationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }

    pub fn notice(&self) -> Option<DenialNotice> {
        match self {
            NavigationDecision::Allow => None,
            NavigationDecision::Redirect { notice, .. } => *notice,
        }
    }
}

// --- API DTOs ---

/// RouteInfo
///
/// Public description of one route table entry, served by `GET /api/routes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteInfo {
    pub name: String,
    pub path: String,
    pub view: String,
    pub access: AccessMeta,
}

/// NavigationRequest
///
/// A navigation to evaluate, together with the raw persisted client state exactly as
/// the browser store holds it. `user` is the serialized user record, not a parsed object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationRequest {
    pub path: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

/// NavigationResponse
///
/// `route` is `None` when the path matched nothing and the not-found view applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationResponse {
    pub route: Option<String>,
    pub view: String,
    pub params: BTreeMap<String, String>,
    pub decision: NavigationDecision,
    pub notice_message: Option<String>,
}
