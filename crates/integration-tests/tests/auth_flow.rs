//! Auth flow integration tests: register, login, session check, logout.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use chainring_integration_tests::{TestApp, body_json, session_cookie};

#[tokio::test]
async fn register_login_me_logout_roundtrip() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/register",
            &json!({"name": "Rider", "email": "rider@example.com", "password": "pedal-power-9"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_json(
            "/login",
            &json!({"email": "rider@example.com", "password": "pedal-power-9"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("login sets the session cookie");

    let response = app.get_with_cookie("/me", &cookie).await;
    let body = body_json(response).await;
    assert_eq!(body["loggedIn"], json!(true));
    assert_eq!(body["email"], json!("rider@example.com"));

    let response = app.post_empty_with_cookie("/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(app.get_with_cookie("/me", &cookie).await).await;
    assert_eq!(body["loggedIn"], json!(false));
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn me_without_a_session_reports_logged_out() {
    let app = TestApp::new();

    let body = body_json(app.get("/me").await).await;
    assert_eq!(body["loggedIn"], json!(false));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::new();
    let payload =
        json!({"name": "Rider", "email": "rider@example.com", "password": "pedal-power-9"});

    assert_eq!(app.post_json("/register", &payload).await.status(), StatusCode::OK);

    let response = app.post_json("/register", &payload).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        json!("Email already in use")
    );
}

#[tokio::test]
async fn registration_validates_email_and_password() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/register",
            &json!({"name": "Rider", "email": "not-an-email", "password": "pedal-power-9"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_json(
            "/register",
            &json!({"name": "Rider", "email": "rider@example.com", "password": "short"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let app = TestApp::new();
    app.post_json(
        "/register",
        &json!({"name": "Rider", "email": "rider@example.com", "password": "pedal-power-9"}),
    )
    .await;

    let response = app
        .post_json(
            "/login",
            &json!({"email": "rider@example.com", "password": "wrong-password"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .post_json(
            "/login",
            &json!({"email": "ghost@example.com", "password": "pedal-power-9"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
