//! Session cookie parsing and construction.

use axum::http::header;

/// Cookie name for the session token.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Extract a cookie value from the Cookie header.
pub fn get_cookie<'a>(headers: &'a axum::http::HeaderMap, name: &str) -> Option<&'a str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

/// Build the Set-Cookie value carrying a freshly issued session token.
/// No Max-Age: the token's embedded expiration is the only time limit.
pub fn session_cookie(token: &str, secure: bool) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/{}",
        SESSION_COOKIE_NAME,
        token,
        if secure { "; Secure" } else { "" }
    )
}

/// Build the Set-Cookie value that discards the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{}",
        SESSION_COOKIE_NAME,
        if secure { "; Secure" } else { "" }
    )
}
