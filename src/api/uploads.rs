//! Read path for stored images.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use super::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/uploads/{name}", get(serve_upload))
        .with_state(state)
}

/// Content type from the stored file's extension. Only the image types we
/// accept on upload get a real type.
fn image_mime(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn serve_upload(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.blobs.read(&name).await {
        Some(bytes) => ([(header::CONTENT_TYPE, image_mime(&name))], bytes).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
