use super::Route;
use crate::{error::RouteTableError, views::View};

/// Teacher Route Declarations
///
/// Course management pages for teachers. Same two-step check as the admin pages,
/// against role 'TEACHER'.
pub fn teacher_routes() -> Result<Vec<Route>, RouteTableError> {
    Ok(vec![
        Route::new("/teacher/dashboard", "TeacherDashboard", View::TeacherDashboard)?
            .requires_auth()
            .requires_teacher(),
        // The course identifier is handed to the view untouched.
        Route::new(
            "/teacher/courses/:courseId",
            "TeacherCourseDetail",
            View::TeacherCourseDetail,
        )?
        .requires_auth()
        .requires_teacher(),
        Route::new(
            "/teacher/upload",
            "TeacherUploadMaterial",
            View::TeacherUploadMaterial,
        )?
        .requires_auth()
        .requires_teacher(),
    ])
}
