use edulink_shell::{
    DenialNotice, MemorySessionStore, NavigationDecision, Navigator, Role, RouteTable,
    guard, route_table, session::ClientSession, views::View,
};
use std::sync::Arc;

fn table() -> Arc<RouteTable> {
    Arc::new(route_table().unwrap())
}

/// Runs the guard for a concrete path against a store, without following redirects.
fn decide(path: &str, store: &MemorySessionStore) -> NavigationDecision {
    let table = table();
    let matched = table.resolve(path).expect("path is in the table");
    guard::check(matched.route.access(), &ClientSession::load(store))
}

fn sessions() -> Vec<MemorySessionStore> {
    vec![
        MemorySessionStore::new(),
        MemorySessionStore::new().with_token(""),
        MemorySessionStore::new().with_token("abc"),
        MemorySessionStore::new().with_token("abc").with_role(Role::Admin),
        MemorySessionStore::new().with_token("abc").with_role(Role::Teacher),
        MemorySessionStore::new().with_token("abc").with_role(Role::Student),
        MemorySessionStore::new().with_role(Role::Admin),
        MemorySessionStore::new().with_token("abc").with_raw_user("not json"),
    ]
}

#[test]
fn test_routes_without_metadata_always_allow() {
    let table = table();
    for route in table.iter().filter(|r| r.access().is_public()) {
        for store in sessions() {
            assert_eq!(decide(route.path(), &store), NavigationDecision::Allow, "{}", route.path());
        }
    }
}

#[test]
fn test_auth_routes_without_token_go_to_login() {
    let table = table();
    let anonymous = [
        MemorySessionStore::new().with_role(Role::Admin),
        MemorySessionStore::new().with_token("").with_role(Role::Teacher),
        MemorySessionStore::new(),
    ];
    for route in table.iter().filter(|r| r.access().requires_auth) {
        let path = route.path().replace(":courseId", "7");
        for store in &anonymous {
            assert_eq!(
                decide(&path, store),
                NavigationDecision::Redirect {
                    to: "/login".to_string(),
                    notice: None
                }
            );
        }
    }
}

#[test]
fn test_admin_routes_require_admin_role() {
    for path in ["/admin/validate", "/admin/manage"] {
        for store in [
            MemorySessionStore::new().with_token("abc"),
            MemorySessionStore::new().with_token("abc").with_role(Role::Teacher),
            MemorySessionStore::new().with_token("abc").with_role(Role::Student),
        ] {
            assert_eq!(
                decide(path, &store),
                NavigationDecision::Redirect {
                    to: "/".to_string(),
                    notice: Some(DenialNotice::AdminRequired)
                }
            );
        }
        let admin = MemorySessionStore::new().with_token("abc").with_role(Role::Admin);
        assert_eq!(decide(path, &admin), NavigationDecision::Allow);
    }
}

#[test]
fn test_teacher_routes_require_teacher_role() {
    for path in ["/teacher/dashboard", "/teacher/courses/42", "/teacher/upload"] {
        for store in [
            MemorySessionStore::new().with_token("abc"),
            MemorySessionStore::new().with_token("abc").with_role(Role::Admin),
        ] {
            assert_eq!(
                decide(path, &store),
                NavigationDecision::Redirect {
                    to: "/".to_string(),
                    notice: Some(DenialNotice::TeacherRequired)
                }
            );
        }
    }
}

// --- Scenarios ---

#[test]
fn scenario_no_token_teacher_dashboard() {
    let mut nav = Navigator::new(table(), MemorySessionStore::new());
    let landed = nav.navigate("/teacher/dashboard").unwrap();
    assert_eq!(landed.location, "/login");
    assert_eq!(landed.view, View::Login);
}

#[test]
fn scenario_teacher_upload() {
    let store = MemorySessionStore::new().with_token("abc").with_role(Role::Teacher);
    let mut nav = Navigator::new(table(), store);
    let landed = nav.navigate("/teacher/upload").unwrap();
    assert_eq!(landed.view, View::TeacherUploadMaterial);
    assert_eq!(landed.notice, None);
}

#[test]
fn scenario_admin_manage() {
    let store = MemorySessionStore::new().with_token("abc").with_role(Role::Admin);
    let mut nav = Navigator::new(table(), store);
    assert_eq!(nav.navigate("/admin/manage").unwrap().view, View::ManageUsers);
}

#[test]
fn scenario_teacher_on_admin_validate() {
    let store = MemorySessionStore::new().with_token("abc").with_role(Role::Teacher);
    let mut nav = Navigator::new(table(), store);
    let landed = nav.navigate("/admin/validate").unwrap();
    assert_eq!(landed.location, "/");
    assert_eq!(landed.notice, Some(DenialNotice::AdminRequired));
    assert_eq!(
        landed.notice.map(|n| n.message()),
        Some("Access denied. Admin privileges required.")
    );
}

#[test]
fn scenario_home_without_token() {
    let mut nav = Navigator::new(table(), MemorySessionStore::new());
    let landed = nav.navigate("/").unwrap();
    assert_eq!(landed.view, View::Landing);
    assert_eq!(landed.redirected_from, None);
}

#[test]
fn scenario_login_then_retry() {
    let mut nav = Navigator::new(table(), MemorySessionStore::new());
    assert_eq!(nav.navigate("/teacher/dashboard").unwrap().view, View::Login);

    // The login flow stores the token and user record.
    nav.store_mut().set_item("token", "abc");
    nav.store_mut().set_item("edulink_user", r#"{"email":"t@edulink.io","role":"TEACHER"}"#);

    assert_eq!(nav.navigate("/teacher/dashboard").unwrap().view, View::TeacherDashboard);
    assert_eq!(nav.current().map(|n| n.location.as_str()), Some("/teacher/dashboard"));
}
