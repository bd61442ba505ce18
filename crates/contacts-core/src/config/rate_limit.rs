//! Rate limiting configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted window: one year.
pub const MAX_WINDOW_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Per-client request budget for rate-limited route groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is applied.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Number of requests allowed per window.
    #[serde(default = "default_times")]
    pub times: u32,
    /// Window length in seconds.
    #[serde(default = "default_seconds")]
    pub seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            times: default_times(),
            seconds: default_seconds(),
        }
    }
}

impl RateLimitConfig {
    /// A window needs at least one request and a length of at most
    /// [`MAX_WINDOW_SECONDS`].
    pub fn validate(&self) -> Result<(), AppError> {
        if self.times == 0 {
            return Err(AppError::configuration("rate_limit.times must be at least 1"));
        }
        if self.seconds > MAX_WINDOW_SECONDS {
            return Err(AppError::configuration(format!(
                "rate_limit.seconds must be at most {MAX_WINDOW_SECONDS}"
            )));
        }
        Ok(())
    }

    /// Tokens regained per second.
    pub fn refill_rate(&self) -> f64 {
        if self.seconds == 0 {
            f64::from(self.times)
        } else {
            f64::from(self.times) / self.seconds as f64
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_times() -> u32 {
    10
}

fn default_seconds() -> u64 {
    60
}
