//! Integration tests for signup, confirmation, login, and token refresh.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_signup_creates_unconfirmed_user() {
    let app = TestApp::new().await;

    let response = app.signup("ada", "ada@example.com").await;

    assert_eq!(response.status, StatusCode::CREATED);
    let user = &response.body["user"];
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["confirmed"], false);
    assert!(user.get("password_hash").is_none());
    assert!(user.get("refresh_token").is_none());
    assert!(
        user["avatar"]
            .as_str()
            .unwrap()
            .starts_with("https://www.gravatar.com/avatar/")
    );
    assert_eq!(
        response.body["detail"],
        "User successfully created. Check your email for confirmation."
    );

    let mail = app.mailer.last_to("ada@example.com").await;
    assert_eq!(mail.username, "ada");
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.signup("ada", "ada@example.com").await;

    let response = app.signup("other", "ADA@example.com").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Account already exists");
}

#[tokio::test]
async fn test_signup_rejects_invalid_body() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": "a",
                "email": "not-an-email",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"].get("email").is_some());
    assert!(response.body["details"].get("username").is_some());
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": "ada",
                "email": "ada@example.com",
                "password": "abc",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_signup_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_requires_confirmed_email() {
    let app = TestApp::new().await;
    app.signup("ada", "ada@example.com").await;

    let response = app.login("ada@example.com", PASSWORD).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Email not confirmed");
    assert_eq!(response.headers[header::WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_confirm_then_login() {
    let app = TestApp::new().await;
    app.signup("ada", "ada@example.com").await;

    let first = app.confirm("ada@example.com").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["message"], "Email confirmed");

    let second = app.confirm("ada@example.com").await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["message"], "Your email is already confirmed");

    let login = app.login("ada@example.com", PASSWORD).await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["token_type"], "bearer");
    assert!(login.body["access_token"].is_string());
    assert!(login.body["refresh_token"].is_string());
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    app.register("ada", "ada@example.com").await;

    let unknown = app.login("nobody@example.com", PASSWORD).await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["message"], "Invalid email");

    let wrong = app.login("ada@example.com", "not-the-password").await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], "Invalid password");

    let incomplete = app
        .post_form("/api/auth/login", &[("username", "ada@example.com")])
        .await;
    assert_eq!(incomplete.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(incomplete.body["error"], "VALIDATION");
    assert!(incomplete.body["message"].as_str().is_some());
}

#[tokio::test]
async fn test_confirm_with_garbage_token() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/auth/confirmed_email/not.a.jwt", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "Invalid token for email verification");
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = TestApp::new().await;
    let tokens = app.register("ada", "ada@example.com").await;

    let response = app
        .request("GET", "/api/auth/refresh_token", None, Some(&tokens.refresh))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_refresh = response.body["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, tokens.refresh);

    let me = app
        .request(
            "GET",
            "/api/users/me",
            None,
            Some(response.body["access_token"].as_str().unwrap()),
        )
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_reuse_revokes_session() {
    let app = TestApp::new().await;
    let tokens = app.register("ada", "ada@example.com").await;

    let rotated = app
        .request("GET", "/api/auth/refresh_token", None, Some(&tokens.refresh))
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let current = rotated.body["refresh_token"].as_str().unwrap().to_string();

    let replay = app
        .request("GET", "/api/auth/refresh_token", None, Some(&tokens.refresh))
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.body["message"], "Invalid refresh token");

    let after = app
        .request("GET", "/api/auth/refresh_token", None, Some(&current))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new().await;
    let tokens = app.register("ada", "ada@example.com").await;

    let response = app
        .request("GET", "/api/auth/refresh_token", None, Some(&tokens.access))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid scope for token");
}

#[tokio::test]
async fn test_refresh_token_cannot_access_api() {
    let app = TestApp::new().await;
    let tokens = app.register("ada", "ada@example.com").await;

    let response = app
        .request("GET", "/api/users/me", None, Some(&tokens.refresh))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_request_email_does_not_reveal_accounts() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/request_email",
            Some(serde_json::json!({ "email": "nobody@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Check your email for confirmation.");
    assert_eq!(app.mailer.count().await, 0);
}

#[tokio::test]
async fn test_request_email_resends_and_reports_confirmed() {
    let app = TestApp::new().await;
    app.signup("ada", "ada@example.com").await;
    app.mailer.last_to("ada@example.com").await;

    let resend = app
        .request(
            "POST",
            "/api/auth/request_email",
            Some(serde_json::json!({ "email": "ada@example.com" })),
            None,
        )
        .await;
    assert_eq!(resend.status, StatusCode::OK);
    assert_eq!(app.mailer.count().await, 2);

    app.confirm("ada@example.com").await;
    let confirmed = app
        .request(
            "POST",
            "/api/auth/request_email",
            Some(serde_json::json!({ "email": "ada@example.com" })),
            None,
        )
        .await;
    assert_eq!(confirmed.body["message"], "Your email is already confirmed");
}

#[tokio::test]
async fn test_confirmation_link_uses_host_header() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::HOST, "contacts.test:8080")
        .body(Body::from(
            serde_json::json!({
                "username": "ada",
                "email": "ada@example.com",
                "password": PASSWORD,
            })
            .to_string(),
        ))
        .unwrap();
    assert_eq!(app.send(req).await.status, StatusCode::CREATED);

    let mail = app.mailer.last_to("ada@example.com").await;
    assert!(
        mail.confirm_url
            .starts_with("http://contacts.test:8080/api/auth/confirmed_email/"),
        "{}",
        mail.confirm_url
    );
}

#[tokio::test]
async fn test_confirmation_link_prefers_public_url() {
    let app = TestApp::with_config(|config| {
        config.rate_limit.enabled = false;
        config.server.public_url = Some("https://contacts.example.com".to_string());
    })
    .await;

    app.signup("ada", "ada@example.com").await;

    let mail = app.mailer.last_to("ada@example.com").await;
    assert!(
        mail.confirm_url
            .starts_with("https://contacts.example.com/api/auth/confirmed_email/")
    );
}
