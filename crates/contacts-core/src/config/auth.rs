//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound for any token lifetime.
pub const MAX_TOKEN_TTL_DAYS: u64 = 3650;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Email confirmation token TTL in days.
    #[serde(default = "default_email_ttl")]
    pub email_token_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn strength score (0-4) a new password must reach.
    #[serde(default = "default_password_score")]
    pub password_min_score: u8,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            email_token_ttl_days: default_email_ttl(),
            password_min_length: default_password_min(),
            password_min_score: default_password_score(),
        }
    }
}

impl AuthConfig {
    /// Reject token lifetimes that are zero or beyond [`MAX_TOKEN_TTL_DAYS`].
    pub fn validate(&self) -> Result<(), AppError> {
        let max_minutes = MAX_TOKEN_TTL_DAYS * 24 * 60;
        if !(1..=max_minutes).contains(&self.access_ttl_minutes) {
            return Err(AppError::configuration(format!(
                "auth.access_ttl_minutes must be between 1 and {max_minutes}"
            )));
        }
        for (name, days) in [
            ("refresh_ttl_days", self.refresh_ttl_days),
            ("email_token_ttl_days", self.email_token_ttl_days),
        ] {
            if !(1..=MAX_TOKEN_TTL_DAYS).contains(&days) {
                return Err(AppError::configuration(format!(
                    "auth.{name} must be between 1 and {MAX_TOKEN_TTL_DAYS}"
                )));
            }
        }
        Ok(())
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_email_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    6
}

fn default_password_score() -> u8 {
    1
}
