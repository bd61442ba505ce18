//! Transport that logs instead of sending.

use async_trait::async_trait;
use tracing::info;

use contacts_core::result::AppResult;
use contacts_core::traits::EmailSender;

use crate::template::VerificationMail;

/// Renders the verification message and emits it as a log event.
#[derive(Debug, Clone)]
pub struct LogMailer {
    templates: VerificationMail,
}

impl LogMailer {
    pub fn new(templates: VerificationMail) -> Self {
        Self { templates }
    }
}

#[async_trait]
impl EmailSender for LogMailer {
    fn transport(&self) -> &str {
        "log"
    }

    async fn send_verification(
        &self,
        email: &str,
        username: &str,
        confirm_url: &str,
    ) -> AppResult<()> {
        let rendered = self.templates.render(username, confirm_url)?;
        info!(
            to = %email,
            subject = %rendered.subject,
            confirm_url = %confirm_url,
            "Mail delivery disabled, verification email logged"
        );
        Ok(())
    }
}
