//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use contacts_core::config::AuthConfig;
use contacts_core::error::AppError;

use super::claims::{Claims, TokenScope};

/// Creates signed HS256 tokens for every scope.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    email_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("email_ttl", &self.email_ttl)
            .finish()
    }
}

/// Access and refresh token issued together at login or refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"bearer"`.
    pub token_type: &'static str,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: ttl(config.access_ttl_minutes, Duration::try_minutes),
            refresh_ttl: ttl(config.refresh_ttl_days, Duration::try_days),
            email_ttl: ttl(config.email_token_ttl_days, Duration::try_days),
        }
    }

    /// Short-lived token authorizing API calls.
    pub fn create_access_token(&self, email: &str) -> Result<String, AppError> {
        self.sign(email, TokenScope::AccessToken, self.access_ttl)
    }

    /// Long-lived token used to obtain a new pair.
    pub fn create_refresh_token(&self, email: &str) -> Result<String, AppError> {
        self.sign(email, TokenScope::RefreshToken, self.refresh_ttl)
    }

    /// Token embedded in the confirmation link.
    pub fn create_email_token(&self, email: &str) -> Result<String, AppError> {
        self.sign(email, TokenScope::EmailToken, self.email_ttl)
    }

    /// Issue a fresh access + refresh pair for `email`.
    pub fn generate_token_pair(&self, email: &str) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.create_access_token(email)?,
            refresh_token: self.create_refresh_token(email)?,
            token_type: "bearer",
        })
    }

    /// Sign a token with an explicit issue time. Exposed for expiry tests.
    pub fn sign_at(
        &self,
        email: &str,
        scope: TokenScope,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            AppError::configuration(format!("{scope:?} lifetime is out of range"))
        })?;
        let claims = Claims {
            sub: email.to_string(),
            scope,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {scope:?} token: {e}")))
    }

    fn sign(&self, email: &str, scope: TokenScope, ttl: Duration) -> Result<String, AppError> {
        self.sign_at(email, scope, Utc::now(), ttl)
    }
}

/// Lifetimes too large for `Duration` saturate; signing then reports them.
fn ttl(amount: u64, unit: fn(i64) -> Option<Duration>) -> Duration {
    i64::try_from(amount)
        .ok()
        .and_then(unit)
        .unwrap_or(Duration::MAX)
}
