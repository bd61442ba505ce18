//! Shared test helpers for API integration tests.
//!
//! The router runs over the in-memory stores, so no database is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use contacts_api::{AppState, build_app};
use contacts_core::config::AppConfig;
use contacts_database::{MemoryContactStore, MemoryUserStore};
use contacts_service::testing::RecordingMailer;
use contacts_storage::LocalAvatarStorage;

pub use contacts_service::testing::PASSWORD;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Captured verification mails
    pub mailer: Arc<RecordingMailer>,
    /// Application config
    pub config: AppConfig,
    /// Avatar root; removed on drop
    pub storage: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
    /// Raw body bytes
    pub raw: Vec<u8>,
}

/// Tokens returned by a successful login.
#[derive(Debug, Clone)]
pub struct Tokens {
    pub access: String,
    pub refresh: String,
}

impl TestApp {
    /// Create a test application with rate limiting disabled.
    pub async fn new() -> Self {
        Self::with_config(|config| config.rate_limit.enabled = false).await
    }

    /// Create a test application after adjusting the default test config.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let storage = TempDir::new().expect("Failed to create temp dir");

        let mut config = AppConfig::with_database_url("postgres://unused@localhost/contacts");
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.root = storage.path().to_string_lossy().into_owned();
        config.storage.public_base_url = "http://localhost:8000".to_string();
        adjust(&mut config);

        let mailer = Arc::new(RecordingMailer::default());
        let avatars = LocalAvatarStorage::new(&config.storage)
            .await
            .expect("Failed to init avatar storage");

        let state = AppState::new(
            config.clone(),
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryContactStore::new()),
            mailer.clone(),
            Arc::new(avatars),
        );

        Self {
            router: build_app(state),
            mailer,
            config,
            storage,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Submit an urlencoded form
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request through the router
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 10 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }

    /// Sign up through the API and return the response
    pub async fn signup(&self, username: &str, email: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": username,
                "email": email,
                "password": PASSWORD,
            })),
            None,
        )
        .await
    }

    /// Follow the most recent confirmation link mailed to `email`
    pub async fn confirm(&self, email: &str) -> TestResponse {
        let mail = self.mailer.last_to(email).await;
        let path = format!("/api/auth/confirmed_email/{}", mail.token());
        self.request("GET", &path, None, None).await
    }

    /// Login with the OAuth2 password form
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post_form(
            "/api/auth/login",
            &[("username", email), ("password", password)],
        )
        .await
    }

    /// Sign up, confirm, and log in; returns the token pair
    pub async fn register(&self, username: &str, email: &str) -> Tokens {
        let signup = self.signup(username, email).await;
        assert_eq!(signup.status, StatusCode::CREATED, "Signup failed: {:?}", signup.body);

        let confirm = self.confirm(email).await;
        assert_eq!(confirm.status, StatusCode::OK, "Confirm failed: {:?}", confirm.body);

        let login = self.login(email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "Login failed: {:?}", login.body);

        Tokens {
            access: token_field(&login.body, "access_token"),
            refresh: token_field(&login.body, "refresh_token"),
        }
    }
}

fn token_field(body: &Value, name: &str) -> String {
    body.get(name)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("No {name} in login response: {body:?}"))
        .to_string()
}

fn urlencode(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
