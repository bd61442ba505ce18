//! Outbound email trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Sends the account verification email.
///
/// The caller issues the confirmation token and builds `confirm_url`; the
/// sender only renders and delivers.
#[async_trait]
pub trait EmailSender: Send + Sync + std::fmt::Debug + 'static {
    /// Transport name (e.g. "smtp", "log").
    fn transport(&self) -> &str;

    /// Render and deliver a verification message to `email`.
    async fn send_verification(&self, email: &str, username: &str, confirm_url: &str)
    -> AppResult<()>;
}
