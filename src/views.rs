use std::collections::BTreeMap;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::DenialNotice;

/// View
///
/// The page components the shell can mount. Rendering a view's content belongs to the
/// front-end bundle; the shell only knows which component to mount and its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Landing,
    Login,
    SearchMaterials,
    UploadDocument,
    CourseForum,
    StudentActivities,
    Profile,
    ValidateDocuments,
    ManageUsers,
    TeacherDashboard,
    TeacherCourseDetail,
    TeacherUploadMaterial,
    NotFound,
}

impl View {
    /// Component name the front-end bundle registers the page under.
    pub fn component(&self) -> &'static str {
        match self {
            View::Landing => "LandingPage",
            View::Login => "LoginPage",
            View::SearchMaterials => "SearchMaterials",
            View::UploadDocument => "UploadDocument",
            View::CourseForum => "CourseForum",
            View::StudentActivities => "StudentActivities",
            View::Profile => "ProfilePage",
            View::ValidateDocuments => "ValidateDocumentsPage",
            View::ManageUsers => "ManageUsersPage",
            View::TeacherDashboard => "TeacherDashboard",
            View::TeacherCourseDetail => "TeacherCourseDetail",
            View::TeacherUploadMaterial => "TeacherUploadMaterial",
            View::NotFound => "NotFoundPage",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Landing => "Home",
            View::Login => "Sign in",
            View::SearchMaterials => "Search materials",
            View::UploadDocument => "Upload document",
            View::CourseForum => "Course forums",
            View::StudentActivities => "My activities",
            View::Profile => "Profile",
            View::ValidateDocuments => "Validate documents",
            View::ManageUsers => "Manage users",
            View::TeacherDashboard => "Teacher dashboard",
            View::TeacherCourseDetail => "Course detail",
            View::TeacherUploadMaterial => "Upload material",
            View::NotFound => "Page not found",
        }
    }
}

/// Everything the HTML shell needs to mount one page.
#[derive(Debug, Clone)]
pub struct PageModel<'a> {
    pub app_title: &'a str,
    pub view: View,
    pub route_name: Option<&'a str>,
    pub params: &'a BTreeMap<String, String>,
    pub notice: Option<DenialNotice>,
}

/// render_shell
///
/// Produces the HTML document that boots the front-end bundle on the given view.
/// A pending denial notice is rendered as a dismissible banner above the mount point.
pub fn render_shell(page: &PageModel<'_>) -> String {
    // BTreeMap<String, String> always serializes.
    let params_json = serde_json::to_string(page.params).unwrap_or_else(|_| "{}".to_string());

    let notice = page
        .notice
        .map(|notice| {
            format!(
                concat!(
                    r#"<div id="notice" class="notice" role="status" data-notice="{code}">"#,
                    r#"<span>{message}</span>"#,
                    r#"<button type="button" onclick="this.parentElement.remove()">Dismiss</button>"#,
                    "</div>\n"
                ),
                code = notice.code(),
                message = encode_text(notice.message()),
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{page_title} | {app_title}</title>\n",
            "</head>\n",
            "<body>\n",
            "{notice}",
            "<div id=\"app\" data-view=\"{component}\" data-route=\"{route}\" data-params=\"{params}\"></div>\n",
            "</body>\n",
            "</html>\n"
        ),
        page_title = encode_text(page.view.title()),
        app_title = encode_text(page.app_title),
        notice = notice,
        component = page.view.component(),
        route = encode_double_quoted_attribute(page.route_name.unwrap_or("")),
        params = encode_double_quoted_attribute(&params_json),
    )
}
