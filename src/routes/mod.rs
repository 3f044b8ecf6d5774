//! Route Table Module Index
//!
//! The page routes are declared in access-segregated modules so a restricted page
//! cannot be added without stating who may see it. The three declaration modules
//! map to the access roles; `RouteTable` assembles and validates them.
use std::collections::BTreeMap;

use crate::{
    error::{HrefError, RouteTableError},
    models::{AccessMeta, RouteInfo},
    views::View,
};

/// Pages anyone can open, signed in or not.
pub mod public;

/// Pages restricted to signed-in users with the 'ADMIN' role.
pub mod admin;

/// Pages restricted to signed-in users with the 'TEACHER' role.
pub mod teacher;

/// JSON and health endpoints served next to the pages.
pub mod api;

pub mod pattern;
use pattern::PathPattern;

/// Route
///
/// One page: its path pattern, the view it mounts, its unique symbolic name and the
/// access it requires.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: PathPattern,
    name: String,
    view: View,
    access: AccessMeta,
}

impl Route {
    /// Declares a public route. Fails on a malformed path pattern.
    pub fn new(path: &str, name: &str, view: View) -> Result<Self, RouteTableError> {
        Ok(Self {
            pattern: PathPattern::parse(path)?,
            name: name.to_string(),
            view,
            access: AccessMeta::default(),
        })
    }

    pub fn requires_auth(mut self) -> Self {
        self.access.requires_auth = true;
        self
    }

    pub fn requires_admin(mut self) -> Self {
        self.access.requires_admin = true;
        self
    }

    pub fn requires_teacher(mut self) -> Self {
        self.access.requires_teacher = true;
        self
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn access(&self) -> &AccessMeta {
        &self.access
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            name: self.name.clone(),
            path: self.path().to_string(),
            view: self.view.component().to_string(),
            access: self.access,
        }
    }
}

/// A resolved path: the route it landed on plus the captured parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch<'_> {
    /// The matched path rewritten in the route's declared spelling.
    pub fn canonical_path(&self) -> String {
        // Every declared parameter was captured, so filling cannot miss one.
        self.route
            .pattern
            .fill(&self.params)
            .unwrap_or_else(|_| self.route.path().to_string())
    }
}

/// RouteTable
///
/// The ordered, immutable set of page routes. Paths and names are unique.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        for (index, route) in routes.iter().enumerate() {
            for earlier in &routes[..index] {
                if earlier.name == route.name {
                    return Err(RouteTableError::DuplicateName(route.name.clone()));
                }
                if earlier.pattern.conflicts_with(&route.pattern) {
                    return Err(RouteTableError::DuplicatePath {
                        path: route.path().to_string(),
                        existing: earlier.path().to_string(),
                    });
                }
            }
        }
        Ok(Self { routes })
    }

    /// resolve
    ///
    /// Finds the route for a concrete path. `None` means the not-found view applies.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(path)
                .map(|params| RouteMatch { route, params })
        })
    }

    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    /// Looks a route up by the path it is mounted under in the HTTP router.
    pub fn by_mount_path(&self, mount_path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.pattern.mount_path() == mount_path)
    }

    /// href
    ///
    /// Builds the concrete path for a named route.
    pub fn href(&self, name: &str, params: &BTreeMap<String, String>) -> Result<String, HrefError> {
        let route = self
            .by_name(name)
            .ok_or_else(|| HrefError::UnknownRoute(name.to_string()))?;

        route
            .pattern
            .fill(params)
            .map_err(|param| HrefError::MissingParameter {
                route: name.to_string(),
                param,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// route_table
///
/// Assembles the EduLink page table: public pages first, then admin and teacher pages.
pub fn route_table() -> Result<RouteTable, RouteTableError> {
    let mut routes = public::public_routes()?;
    routes.extend(admin::admin_routes()?);
    routes.extend(teacher::teacher_routes()?);
    RouteTable::new(routes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edulink_table_is_valid() {
        let table = route_table().unwrap();
        assert_eq!(table.len(), 12);
        assert!(table.by_name("landing").is_some());
        assert!(table.by_name("TeacherCourseDetail").is_some());
    }

    #[test]
    fn test_public_routes_have_no_metadata() {
        let table = route_table().unwrap();
        for name in ["landing", "login", "search", "upload", "forums", "activities", "profile"] {
            assert!(table.by_name(name).unwrap().access().is_public(), "route: {name}");
        }
    }

    #[test]
    fn test_restricted_routes_carry_metadata() {
        let table = route_table().unwrap();
        for name in ["validate", "manage"] {
            let access = table.by_name(name).unwrap().access();
            assert!(access.requires_auth && access.requires_admin && !access.requires_teacher);
        }
        for name in ["TeacherDashboard", "TeacherCourseDetail", "TeacherUploadMaterial"] {
            let access = table.by_name(name).unwrap().access();
            assert!(access.requires_auth && access.requires_teacher && !access.requires_admin);
        }
    }

    #[test]
    fn test_resolve_extracts_params() {
        let table = route_table().unwrap();
        let m = table.resolve("/teacher/courses/cs-101").unwrap();
        assert_eq!(m.route.name(), "TeacherCourseDetail");
        assert_eq!(m.params.get("courseId").map(String::as_str), Some("cs-101"));
        assert_eq!(m.canonical_path(), "/teacher/courses/cs-101");
    }

    #[test]
    fn test_resolve_unknown_path_is_none() {
        let table = route_table().unwrap();
        assert!(table.resolve("/nowhere").is_none());
        assert!(table.resolve("/teacher/courses").is_none());
    }

    #[test]
    fn test_canonical_path_normalizes_spelling() {
        let table = route_table().unwrap();
        let m = table.resolve("/Admin/Validate/").unwrap();
        assert_eq!(m.canonical_path(), "/admin/validate");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let routes = vec![
            Route::new("/a", "same", View::Landing).unwrap(),
            Route::new("/b", "same", View::Login).unwrap(),
        ];
        assert_eq!(
            RouteTable::new(routes).unwrap_err(),
            RouteTableError::DuplicateName("same".to_string())
        );
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let routes = vec![
            Route::new("/courses/:id", "one", View::Landing).unwrap(),
            Route::new("/Courses/:courseId", "two", View::Login).unwrap(),
        ];
        assert!(matches!(
            RouteTable::new(routes),
            Err(RouteTableError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn test_href() {
        let table = route_table().unwrap();
        let mut params = BTreeMap::new();
        assert_eq!(table.href("login", &params).unwrap(), "/login");
        assert_eq!(
            table.href("TeacherCourseDetail", &params),
            Err(HrefError::MissingParameter {
                route: "TeacherCourseDetail".to_string(),
                param: "courseId".to_string(),
            })
        );
        params.insert("courseId".to_string(), "7".to_string());
        assert_eq!(table.href("TeacherCourseDetail", &params).unwrap(), "/teacher/courses/7");
        assert_eq!(
            table.href("missing", &params),
            Err(HrefError::UnknownRoute("missing".to_string()))
        );
    }

    #[test]
    fn test_by_mount_path() {
        let table = route_table().unwrap();
        let route = table.by_mount_path("/teacher/courses/{courseId}").unwrap();
        assert_eq!(route.name(), "TeacherCourseDetail");
        assert!(table.by_mount_path("/teacher/courses/:courseId").is_none());
    }
}
