//! Cookie-based session authentication.
//!
//! A single signed, stateless token (1 hour) carried in an HttpOnly cookie.
//! Two extractors share the same resolution logic: [`SessionState`] annotates
//! every request without ever blocking it, [`RequireAuth`] gates protected
//! routes and redirects to the login page on failure.

mod cookie;
mod errors;
mod extractors;
mod state;
mod types;

pub use cookie::{SESSION_COOKIE_NAME, clear_session_cookie, get_cookie, session_cookie};
pub use errors::{LOGIN_PATH, LoginRedirect};
pub use extractors::{RequireAuth, SessionState};
pub use state::HasSessionAuth;
pub use types::{AuthenticatedUser, RequestIdentity};
