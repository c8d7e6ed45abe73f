//! CLI argument parsing, validation, and startup helpers.

use crate::ServerConfig;
use crate::db::Database;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

const MIN_SESSION_SECRET_LENGTH: usize = 32;

#[derive(clap::ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "Quillpost",
    about = "A small publishing service with signed-session authentication"
)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Path to SQLite database file
    #[arg(short, long, default_value = "quillpost.db")]
    pub database: String,

    /// Directory for uploaded images
    #[arg(short, long, default_value = "uploads")]
    pub uploads_dir: String,

    /// Read the session secret from this file instead of SESSION_SECRET
    #[arg(long)]
    pub session_secret_file: Option<String>,

    /// Set the Secure flag on session cookies (use behind HTTPS)
    #[arg(long)]
    pub secure_cookies: bool,

    /// Log output format
    #[arg(short, long, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Initialize logging based on the specified format.
pub fn init_logging(format: &LogFormat) {
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::init(),
        LogFormat::Json => tracing_subscriber::fmt().json().init(),
        LogFormat::Compact => tracing_subscriber::fmt().compact().init(),
    }
}

/// Load the session secret from the environment variable or a file.
/// Returns None and logs an error if the secret cannot be loaded.
pub fn load_session_secret(secret_file: Option<&str>) -> Option<String> {
    let secret = if let Ok(secret) = std::env::var("SESSION_SECRET") {
        // Clear the environment variable to prevent leaking.
        // SAFETY: We're single-threaded at this point during startup,
        // and no other code is reading this environment variable.
        unsafe { std::env::remove_var("SESSION_SECRET") };
        secret
    } else if let Some(path) = secret_file {
        match std::fs::read_to_string(path) {
            Ok(content) => content.trim().to_string(),
            Err(e) => {
                error!(path = %path, error = %e, "Failed to read session secret file");
                return None;
            }
        }
    } else {
        error!(
            "Session secret is required. Set SESSION_SECRET environment variable (recommended) or use --session-secret-file"
        );
        return None;
    };

    if secret.len() < MIN_SESSION_SECRET_LENGTH {
        error!(
            "Session secret is shorter than {} characters. Use a longer secret",
            MIN_SESSION_SECRET_LENGTH
        );
        return None;
    }

    Some(secret)
}

/// Open the database, logging errors if it fails.
pub async fn open_database(path: &str) -> Option<Database> {
    match Database::open(path).await {
        Ok(db) => {
            info!(path = %path, "Database opened");
            Some(db)
        }
        Err(e) => {
            error!(path = %path, error = %e, "Failed to open database");
            None
        }
    }
}

/// Build ServerConfig from validated arguments.
pub fn build_config(args: &Args, db: Database, session_secret: String) -> ServerConfig {
    ServerConfig {
        db,
        session_secret: session_secret.into_bytes(),
        uploads_dir: PathBuf::from(&args.uploads_dir),
        secure_cookies: args.secure_cookies,
    }
}
