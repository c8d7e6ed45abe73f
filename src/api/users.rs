//! Registration, login, logout, and profile routes.

use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::{ApiError, ResultExt};
use crate::auth::{RequireAuth, SessionState, clear_session_cookie, session_cookie};
use crate::db::NewUser;
use crate::password;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/profile", get(profile).post(update_profile))
        // 5MB cap covers the profile image plus form overhead
        .layer(DefaultBodyLimit::max(5 * 1024 * 1024))
        .with_state(state)
}

// --- Request/Response types ---

#[derive(Serialize)]
struct PageInfo {
    title: &'static str,
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct ProfileResponse {
    uuid: String,
    full_name: String,
    email: String,
    username: String,
    profile_image: Option<String>,
}

#[derive(Deserialize)]
struct UpdateProfileForm {
    full_name: String,
    email: String,
    username: String,
}

// --- Handlers ---

/// Sign-up page. Visitors who already hold a session go to their profile.
async fn register_page(SessionState(identity): SessionState) -> Response {
    if identity.is_authenticated() {
        Redirect::to("/profile").into_response()
    } else {
        Json(PageInfo { title: "Sign Up" }).into_response()
    }
}

async fn login_page(SessionState(identity): SessionState) -> Response {
    if identity.is_authenticated() {
        Redirect::to("/profile").into_response()
    } else {
        Json(PageInfo { title: "Login" }).into_response()
    }
}

/// Create an account from a multipart form. All fields, the profile image
/// included, are required; nothing is written until they all check out.
async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut full_name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut username: Option<String> = None;
    let mut password: Option<String> = None;
    let mut profile_image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Invalid multipart data"))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "full_name" => {
                full_name = Some(read_text(field, "full_name").await?);
            }
            "email" => {
                email = Some(read_text(field, "email").await?);
            }
            "username" => {
                username = Some(read_text(field, "username").await?);
            }
            "password" => {
                password = Some(read_text(field, "password").await?);
            }
            "profile_image" => {
                let file_name = field.file_name().unwrap_or("profile").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("Failed to read profile_image"))?;
                if !data.is_empty() {
                    profile_image = Some((file_name, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    let (Some(full_name), Some(email), Some(username), Some(password), Some((image_name, image_bytes))) =
        (full_name, email, username, password, profile_image)
    else {
        return Err(ApiError::bad_request("All fields are required"));
    };

    if full_name.is_empty() || email.is_empty() || username.is_empty() || password.is_empty() {
        return Err(ApiError::bad_request("All fields are required"));
    }

    let available = state
        .db
        .users()
        .is_username_available(&username)
        .await
        .db_err("Failed to check username")?;
    if !available {
        return Err(ApiError::bad_request("Username is already taken"));
    }

    let password_hash = password::hash_password(&password)
        .map_err(|e| ApiError::storage("Failed to hash password", e))?;

    let image_ref = state
        .blobs
        .save(&image_name, &image_bytes)
        .await
        .db_err("Failed to store profile image")?;

    state
        .db
        .users()
        .create(NewUser {
            full_name: &full_name,
            email: &email,
            username: &username,
            password_hash: &password_hash,
            profile_image: Some(&image_ref),
        })
        .await
        .db_err("Failed to create user")?;

    Ok(Redirect::to("/login").into_response())
}

/// Verify credentials and issue the session cookie.
/// Unknown user and wrong password get the same answer.
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let user = state
        .db
        .users()
        .get_by_username(&form.username)
        .await
        .db_err("Failed to look up user")?;

    let Some(user) = user else {
        return Err(ApiError::bad_request("Invalid username or password"));
    };

    let matches = password::verify_password(&form.password, &user.password_hash)
        .map_err(|e| ApiError::storage("Failed to verify password", e))?;
    if !matches {
        return Err(ApiError::bad_request("Invalid username or password"));
    }

    let token = state
        .jwt
        .issue_session_token(&user.uuid)
        .map_err(|e| ApiError::storage("Failed to issue session token", e))?;

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, state.secure_cookies))],
        Redirect::to("/"),
    )
        .into_response())
}

/// Discard the session cookie. The token itself stays valid until it
/// expires; there is no revocation list.
async fn logout(State(state): State<AppState>) -> Response {
    (
        [(header::SET_COOKIE, clear_session_cookie(state.secure_cookies))],
        Redirect::to("/"),
    )
        .into_response()
}

/// The caller's own profile. The password hash never leaves the handler.
async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let stored = state
        .db
        .users()
        .get_by_uuid(&user.user_uuid)
        .await
        .db_err("Failed to load user")?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ProfileResponse {
        uuid: stored.uuid,
        full_name: stored.full_name,
        email: stored.email,
        username: stored.username,
        profile_image: stored.profile_image,
    }))
}

/// Update the caller's name, email, and username.
async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<UpdateProfileForm>,
) -> Result<Response, ApiError> {
    if form.full_name.is_empty() || form.email.is_empty() || form.username.is_empty() {
        return Err(ApiError::bad_request("All fields are required"));
    }

    let stored = state
        .db
        .users()
        .get_by_uuid(&user.user_uuid)
        .await
        .db_err("Failed to load user")?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !form.username.eq_ignore_ascii_case(&stored.username) {
        let available = state
            .db
            .users()
            .is_username_available(&form.username)
            .await
            .db_err("Failed to check username")?;
        if !available {
            return Err(ApiError::bad_request("Username is already taken"));
        }
    }

    state
        .db
        .users()
        .update_profile(&user.user_uuid, &form.full_name, &form.email, &form.username)
        .await
        .db_err("Failed to update profile")?;

    Ok(Redirect::to("/profile").into_response())
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|_| ApiError::bad_request(format!("Failed to read {}", name)))
}
