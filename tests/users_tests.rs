//! Tests for registration, login, and profile routes.

mod common;

use axum::http::StatusCode;
use common::*;
use quillpost::password::verify_password;
use tower::ServiceExt;

const REGISTER_FIELDS: [(&str, &str); 4] = [
    ("full_name", "Alice Example"),
    ("email", "alice@example.com"),
    ("username", "alice"),
    ("password", "pw1"),
];

#[tokio::test]
async fn test_register_stores_hashed_password() {
    let (app, db, _jwt) = create_test_app().await;

    let response = app
        .oneshot(post_multipart(
            "/register",
            None,
            &REGISTER_FIELDS,
            Some(("profile_image", "avatar.png", b"fake png")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let user = db.users().get_by_username("alice").await.unwrap().unwrap();
    assert_eq!(user.full_name, "Alice Example");
    assert_ne!(user.password_hash, "pw1");
    assert!(verify_password("pw1", &user.password_hash).unwrap());
    assert!(user.profile_image.unwrap().starts_with("/uploads/"));
}

#[tokio::test]
async fn test_register_missing_field_writes_nothing() {
    let (app, db, _jwt) = create_test_app().await;

    // No email field
    let response = app
        .oneshot(post_multipart(
            "/register",
            None,
            &[
                ("full_name", "Alice Example"),
                ("username", "alice"),
                ("password", "pw1"),
            ],
            Some(("profile_image", "avatar.png", b"fake png")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count_rows(&db, "users").await, 0);
}

#[tokio::test]
async fn test_register_missing_image_writes_nothing() {
    let (app, db, _jwt) = create_test_app().await;

    let response = app
        .oneshot(post_multipart("/register", None, &REGISTER_FIELDS, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count_rows(&db, "users").await, 0);
}

#[tokio::test]
async fn test_register_duplicate_username_rejected() {
    let (app, db, _jwt) = create_test_app().await;
    create_user(&db, "alice", "pw1").await;

    let response = app
        .oneshot(post_multipart(
            "/register",
            None,
            &REGISTER_FIELDS,
            Some(("profile_image", "avatar.png", b"fake png")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count_rows(&db, "users").await, 1);
}

#[tokio::test]
async fn test_login_issues_session_cookie() {
    let (app, db, jwt) = create_test_app().await;
    let uuid = create_user(&db, "alice", "pw1").await;

    let response = app
        .oneshot(post_form("/login", None, "username=alice&password=pw1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));

    // The issued token resolves back to the user who logged in
    let token = set_cookie
        .strip_prefix("token=")
        .unwrap()
        .split(';')
        .next()
        .unwrap();
    let claims = jwt.validate_session_token(token).unwrap();
    assert_eq!(claims.sub, uuid);
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    let (app, db, _jwt) = create_test_app().await;
    create_user(&db, "alice", "pw1").await;

    let response = app
        .oneshot(post_form("/login", None, "username=alice&password=pw2"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("set-cookie").is_none());
}

#[tokio::test]
async fn test_login_unknown_user_rejected_with_same_message() {
    let (app, db, _jwt) = create_test_app().await;
    create_user(&db, "alice", "pw1").await;

    let wrong_pw = app
        .clone()
        .oneshot(post_form("/login", None, "username=alice&password=pw2"))
        .await
        .unwrap();
    let unknown = app
        .oneshot(post_form("/login", None, "username=mallory&password=pw2"))
        .await
        .unwrap();

    assert_eq!(wrong_pw.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let a = body_json(wrong_pw).await;
    let b = body_json(unknown).await;
    assert_eq!(a["error"], b["error"]);
}

#[tokio::test]
async fn test_profile_excludes_password_hash() {
    let (app, db, jwt) = create_test_app().await;
    let uuid = create_user(&db, "alice", "pw1").await;
    let cookie = session_cookie_for(&jwt, &uuid);

    let response = app.oneshot(get("/profile", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["username"], "alice");
    assert_eq!(json["uuid"], uuid);
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_profile_of_vanished_user_is_not_found() {
    let (app, db, jwt) = create_test_app().await;
    let uuid = create_user(&db, "alice", "pw1").await;
    let cookie = session_cookie_for(&jwt, &uuid);

    // The token outlives the row it points at
    sqlx::query("DELETE FROM users WHERE uuid = ?")
        .bind(&uuid)
        .execute(db.pool())
        .await
        .unwrap();

    let response = app.oneshot(get("/profile", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_profile_changes_only_profile_fields() {
    let (app, db, jwt) = create_test_app().await;
    let uuid = create_user(&db, "alice", "pw1").await;
    let cookie = session_cookie_for(&jwt, &uuid);
    let before = db.users().get_by_uuid(&uuid).await.unwrap().unwrap();

    let response = app
        .oneshot(post_form(
            "/profile",
            Some(&cookie),
            "full_name=Alice+Q&email=aq%40example.com&username=aliceq",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile");

    let after = db.users().get_by_uuid(&uuid).await.unwrap().unwrap();
    assert_eq!(after.full_name, "Alice Q");
    assert_eq!(after.email, "aq@example.com");
    assert_eq!(after.username, "aliceq");
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(after.profile_image, before.profile_image);
}

#[tokio::test]
async fn test_update_profile_rejects_taken_username() {
    let (app, db, jwt) = create_test_app().await;
    let uuid = create_user(&db, "alice", "pw1").await;
    create_user(&db, "bob", "pw2").await;
    let cookie = session_cookie_for(&jwt, &uuid);

    let response = app
        .oneshot(post_form(
            "/profile",
            Some(&cookie),
            "full_name=Alice&email=a%40example.com&username=bob",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let unchanged = db.users().get_by_uuid(&uuid).await.unwrap().unwrap();
    assert_eq!(unchanged.username, "alice");
}
