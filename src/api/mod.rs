//! Route handlers and router assembly.

mod error;
mod posts;
mod uploads;
mod users;

use axum::Router;
use std::sync::Arc;

use crate::auth::HasSessionAuth;
use crate::blobs::BlobStore;
use crate::db::Database;
use crate::jwt::JwtConfig;

pub use error::{ApiError, ResultExt, validate_id};

/// Shared state for all route handlers. Read-only after startup; each
/// handler works from a cheap clone.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtConfig>,
    pub blobs: BlobStore,
    pub secure_cookies: bool,
}

impl HasSessionAuth for AppState {
    fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(users::router(state.clone()))
        .merge(posts::router(state.clone()))
        .merge(uploads::router(state))
}
