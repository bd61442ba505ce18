//! Test support shared by the service unit tests and, through the
//! `testing` feature, by the API integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use contacts_auth::jwt::{JwtDecoder, JwtEncoder};
use contacts_auth::password::{PasswordHasher, PasswordValidator};
use contacts_core::config::AuthConfig;
use contacts_core::result::AppResult;
use contacts_core::traits::EmailSender;
use contacts_database::memory::MemoryUserStore;

use crate::auth::AuthService;

pub const PASSWORD: &str = "correct-horse-battery-staple-42";
pub const BASE_URL: &str = "http://localhost:8000/";

/// A verification mail captured by [`RecordingMailer`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub email: String,
    pub username: String,
    pub confirm_url: String,
}

impl SentMail {
    /// The email token at the end of the confirmation link.
    pub fn token(&self) -> &str {
        self.confirm_url.rsplit('/').next().unwrap_or_default()
    }
}

/// Mailer that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    /// Wait for the background task to hand over message number `n` (1-based).
    pub async fn nth(&self, n: usize) -> SentMail {
        for _ in 0..200 {
            if let Some(mail) = self.sent.lock().await.get(n - 1) {
                return mail.clone();
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("mail #{n} was never sent");
    }

    /// Wait for the background task to hand over the latest mail to `email`.
    pub async fn last_to(&self, email: &str) -> SentMail {
        for _ in 0..200 {
            if let Some(mail) = self.sent.lock().await.iter().rev().find(|m| m.email == email) {
                return mail.clone();
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no mail was sent to {email}");
    }

    /// Number of mails handed over so far, after letting spawned tasks run.
    pub async fn count(&self) -> usize {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    fn transport(&self) -> &str {
        "recording"
    }

    async fn send_verification(
        &self,
        email: &str,
        username: &str,
        confirm_url: &str,
    ) -> AppResult<()> {
        self.sent.lock().await.push(SentMail {
            email: email.to_string(),
            username: username.to_string(),
            confirm_url: confirm_url.to_string(),
        });
        Ok(())
    }
}

pub struct AuthFixture {
    pub service: AuthService,
    pub users: Arc<MemoryUserStore>,
    pub mailer: Arc<RecordingMailer>,
    pub encoder: Arc<JwtEncoder>,
}

pub fn auth_fixture() -> AuthFixture {
    let config = AuthConfig {
        jwt_secret: "service-test-secret".into(),
        ..AuthConfig::default()
    };
    let users = Arc::new(MemoryUserStore::new());
    let mailer = Arc::new(RecordingMailer::default());
    let encoder = Arc::new(JwtEncoder::new(&config));
    let service = AuthService::new(
        users.clone(),
        encoder.clone(),
        Arc::new(JwtDecoder::new(&config)),
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordValidator::new(&config)),
        mailer.clone(),
    );
    AuthFixture {
        service,
        users,
        mailer,
        encoder,
    }
}
