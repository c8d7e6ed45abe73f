//! Quillpost: a small publishing service with signed-session authentication.
//!
//! Users register, log in, and create or edit posts that optionally carry an
//! uploaded image. Identity is a stateless signed token in an HttpOnly
//! cookie; every request is annotated with its identity, protected routes
//! are gated, and post edits require ownership.

pub mod api;
pub mod auth;
pub mod blobs;
pub mod cli;
pub mod db;
pub mod jwt;
pub mod password;

use api::{AppState, create_router};
use axum::Router;
use blobs::BlobStore;
use db::Database;
use jwt::JwtConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct ServerConfig {
    /// Database connection (cloneable, uses a connection pool internally)
    pub db: Database,
    /// Secret for signing session tokens, loaded once at startup
    pub session_secret: Vec<u8>,
    /// Directory where uploaded images are stored
    pub uploads_dir: PathBuf,
    /// Whether to set the Secure flag on session cookies (behind HTTPS)
    pub secure_cookies: bool,
}

/// Create the application router with the given configuration.
pub fn create_app(config: &ServerConfig) -> Router {
    let state = AppState {
        db: config.db.clone(),
        jwt: Arc::new(JwtConfig::new(&config.session_secret)),
        blobs: BlobStore::new(config.uploads_dir.clone()),
        secure_cookies: config.secure_cookies,
    };
    create_router(state)
}

/// Run the server on the given listener. Blocks until the server exits.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let app = create_app(&config);
    axum::serve(listener, app).await
}
