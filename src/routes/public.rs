use super::Route;
use crate::{error::RouteTableError, views::View};

/// Public Route Declarations
///
/// Pages open to any visitor, signed in or not. None of them carry access metadata,
/// so the guard always lets navigation through.
///
/// The landing (`/`) and login (`/login`) pages are the guard's redirect targets and
/// must stay public, otherwise a redirect could itself be redirected.
pub fn public_routes() -> Result<Vec<Route>, RouteTableError> {
    Ok(vec![
        // Landing page. Also where privilege denials end up, with the notice banner.
        Route::new("/", "landing", View::Landing)?,
        // Sign-in form. Writes the token and user record on success.
        Route::new("/login", "login", View::Login)?,
        Route::new("/search", "search", View::SearchMaterials)?,
        Route::new("/upload", "upload", View::UploadDocument)?,
        Route::new("/forums", "forums", View::CourseForum)?,
        Route::new("/activities", "activities", View::StudentActivities)?,
        Route::new("/profile", "profile", View::Profile)?,
    ])
}
