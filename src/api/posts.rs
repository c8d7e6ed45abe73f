//! Home feed and post creation/editing routes.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Serialize;

use super::AppState;
use super::error::{ApiError, ResultExt, validate_id};
use crate::auth::{RequireAuth, SessionState};
use crate::db::Post;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/create", get(create_page).post(create_post))
        .route("/edit/{id}", get(edit_page).post(edit_post))
        // 10MB cap for the post image plus form overhead
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state)
}

// --- Response types ---

#[derive(Serialize)]
struct PostItem {
    uuid: String,
    title: String,
    content: String,
    image: Option<String>,
    author: String,
    created_at: String,
}

#[derive(Serialize)]
struct HomePage {
    logged_in: bool,
    posts: Vec<PostItem>,
}

#[derive(Serialize)]
struct PageInfo {
    title: &'static str,
}

#[derive(Serialize)]
struct EditPage {
    uuid: String,
    title: String,
    content: String,
    image: Option<String>,
}

// --- Handlers ---

/// Home feed, newest posts first. Open to everyone; the identity only
/// decides the logged-in flag.
async fn home(
    State(state): State<AppState>,
    SessionState(identity): SessionState,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .db
        .posts()
        .list_newest_first()
        .await
        .db_err("Failed to list posts")?;

    Ok(Json(HomePage {
        logged_in: identity.is_authenticated(),
        posts: posts
            .into_iter()
            .map(|p| PostItem {
                uuid: p.uuid,
                title: p.title,
                content: p.content,
                image: p.image,
                author: p.author_username,
                created_at: p.created_at,
            })
            .collect(),
    }))
}

async fn create_page(RequireAuth(_user): RequireAuth) -> impl IntoResponse {
    Json(PageInfo {
        title: "Create Post",
    })
}

/// Create a post owned by the caller.
async fn create_post(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_post_form(&mut multipart).await?;

    let (Some(title), Some(content)) = (form.title, form.content) else {
        return Err(ApiError::bad_request("Title and content are required"));
    };

    let image_ref = match form.image {
        Some((name, bytes)) => Some(
            state
                .blobs
                .save(&name, &bytes)
                .await
                .db_err("Failed to store image")?,
        ),
        None => None,
    };

    state
        .db
        .posts()
        .create(&user.user_uuid, &title, &content, image_ref.as_deref())
        .await
        .db_err("Failed to create post")?;

    Ok(Redirect::to("/").into_response())
}

async fn edit_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = load_owned_post(&state, &id, &user.user_uuid).await?;

    Ok(Json(EditPage {
        uuid: post.uuid,
        title: post.title,
        content: post.content,
        image: post.image,
    }))
}

/// Apply an edit to a post the caller owns. A submission without a new
/// image clears the stored reference.
async fn edit_post(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let post = load_owned_post(&state, &id, &user.user_uuid).await?;

    let form = read_post_form(&mut multipart).await?;
    let (Some(title), Some(content)) = (form.title, form.content) else {
        return Err(ApiError::bad_request("Title and content are required"));
    };

    let image_ref = match form.image {
        Some((name, bytes)) => Some(
            state
                .blobs
                .save(&name, &bytes)
                .await
                .db_err("Failed to store image")?,
        ),
        None => None,
    };

    state
        .db
        .posts()
        .update(&post.uuid, &title, &content, image_ref.as_deref())
        .await
        .db_err("Failed to update post")?;

    Ok(Redirect::to("/").into_response())
}

// --- Helpers ---

/// Ownership check for edits. The order is load-bearing: a malformed id
/// never reaches the store, and authorship is never evaluated against a
/// post that does not exist.
async fn load_owned_post(
    state: &AppState,
    id: &str,
    user_uuid: &str,
) -> Result<Post, ApiError> {
    validate_id(id)?;

    let post = state
        .db
        .posts()
        .get_by_uuid(id)
        .await
        .db_err("Failed to load post")?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    if post.author_uuid != user_uuid {
        return Err(ApiError::forbidden("You do not own this post"));
    }

    Ok(post)
}

struct PostForm {
    title: Option<String>,
    content: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

async fn read_post_form(multipart: &mut Multipart) -> Result<PostForm, ApiError> {
    let mut form = PostForm {
        title: None,
        content: None,
        image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Invalid multipart data"))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => {
                form.title = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::bad_request("Failed to read title"))?,
                );
            }
            "content" => {
                form.content = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::bad_request("Failed to read content"))?,
                );
            }
            "image" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::bad_request("Failed to read image"))?;
                if !data.is_empty() {
                    form.image = Some((file_name, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}
