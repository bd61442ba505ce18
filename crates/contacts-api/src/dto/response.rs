//! Response DTOs.

use serde::{Deserialize, Serialize};

use contacts_entity::user::User;

/// Message returned with a freshly created account.
pub const SIGNUP_DETAIL: &str = "User successfully created. Check your email for confirmation.";

/// Body of a successful signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user: User,
    pub detail: String,
}

impl SignupResponse {
    pub fn new(user: User) -> Self {
        Self {
            user,
            detail: SIGNUP_DETAIL.to_string(),
        }
    }
}

/// Simple `{message}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// `up`, `down`, or `disabled` when no pool is attached.
    pub database: String,
    /// Seconds since the process started serving.
    pub uptime_seconds: u64,
}
