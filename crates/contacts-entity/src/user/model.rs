//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account owning an address book.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name chosen at signup.
    pub username: String,
    /// Login identity; unique ignoring case.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Public avatar URL.
    pub avatar: Option<String>,
    /// The single refresh token currently accepted for this user.
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    /// Whether the email address has been verified.
    pub confirmed: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user may log in.
    pub fn can_login(&self) -> bool {
        self.confirmed
    }

    /// Whether `token` is the refresh token on record.
    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial avatar URL.
    pub avatar: Option<String>,
}
