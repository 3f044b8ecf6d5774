use super::Route;
use crate::{error::RouteTableError, views::View};

/// Admin Route Declarations
///
/// Moderation pages. Each requires a stored token (otherwise the visitor is sent to
/// `/login`) and a user record with role 'ADMIN' (otherwise back to `/` with the
/// admin denial notice).
pub fn admin_routes() -> Result<Vec<Route>, RouteTableError> {
    Ok(vec![
        // Review queue for uploaded documents awaiting validation.
        Route::new("/admin/validate", "validate", View::ValidateDocuments)?
            .requires_auth()
            .requires_admin(),
        // User administration.
        Route::new("/admin/manage", "manage", View::ManageUsers)?
            .requires_auth()
            .requires_admin(),
    ])
}
