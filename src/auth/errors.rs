//! Hard-gate rejection.
//!
//! Unauthenticated requests at a protected route are sent to the login page
//! rather than answered with an error status.

use axum::response::{IntoResponse, Redirect, Response};

/// Where unauthenticated requests are redirected.
pub const LOGIN_PATH: &str = "/login";

/// Rejection for [`super::RequireAuth`]. Cookies are left untouched so an
/// unrelated valid session is not destroyed by one bad request.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}
