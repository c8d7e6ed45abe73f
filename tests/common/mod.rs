#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use quillpost::db::{Database, NewUser};
use quillpost::jwt::JwtConfig;
use quillpost::password::hash_password;
use quillpost::{ServerConfig, create_app};

pub const TEST_SECRET: &[u8] = b"test-session-secret-0123456789abcdef";

/// Create a test app backed by an in-memory database and a throwaway
/// uploads directory. Returns (app, db, jwt) so tests can seed data and
/// mint session tokens directly.
pub async fn create_test_app() -> (Router, Database, JwtConfig) {
    let db = Database::open(":memory:")
        .await
        .expect("Failed to open test database");

    let uploads_dir =
        std::env::temp_dir().join(format!("quillpost-test-{}", uuid::Uuid::new_v4()));

    let config = ServerConfig {
        db: db.clone(),
        session_secret: TEST_SECRET.to_vec(),
        uploads_dir,
        secure_cookies: false,
    };

    (create_app(&config), db, JwtConfig::new(TEST_SECRET))
}

/// Insert a user with a bcrypt-hashed password. Returns the user uuid.
pub async fn create_user(db: &Database, username: &str, password: &str) -> String {
    let hash = hash_password(password).expect("Failed to hash password");
    db.users()
        .create(NewUser {
            full_name: "Test User",
            email: "test@example.com",
            username,
            password_hash: &hash,
            profile_image: Some("/uploads/1-avatar.png"),
        })
        .await
        .expect("Failed to create user")
}

/// Cookie header value for a freshly issued session token.
pub fn session_cookie_for(jwt: &JwtConfig, user_uuid: &str) -> String {
    let token = jwt
        .issue_session_token(user_uuid)
        .expect("Failed to issue token");
    format!("token={}", token)
}

pub const BOUNDARY: &str = "quillpost-test-boundary";

/// Build a multipart/form-data body from text fields and an optional file
/// part. Returns (content-type, body).
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// GET request with an optional session cookie.
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

/// Multipart POST request with an optional session cookie.
pub fn post_multipart(
    uri: &str,
    cookie: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let (content_type, body) = multipart_body(fields, file);
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder
        .body(Body::from(body))
        .expect("Failed to build request")
}

/// Form-urlencoded POST request with an optional session cookie.
pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

/// Read a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Location header of a redirect response.
pub fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("Missing Location header")
        .to_str()
        .expect("Invalid Location header")
}

/// Count rows in a table via raw SQL.
pub async fn count_rows(db: &Database, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db.pool())
        .await
        .expect("Failed to count rows");
    count
}
