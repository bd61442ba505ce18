//! SMTP transport using lettre.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use contacts_core::config::MailConfig;
use contacts_core::error::{AppError, ErrorKind};
use contacts_core::result::AppResult;
use contacts_core::traits::EmailSender;

use crate::template::{RenderedMail, VerificationMail};

/// Sends verification mail through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    templates: VerificationMail,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish()
    }
}

impl SmtpMailer {
    /// Build the transport from configuration.
    ///
    /// With `use_tls` the relay builder negotiates implicit TLS. Without it
    /// a plain connection is used, which suits local catchers such as Mailpit.
    pub fn new(config: &MailConfig, templates: VerificationMail) -> AppResult<Self> {
        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host).map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid SMTP relay host", e)
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let builder = if config.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
        };

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_address)
            .parse()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid mail sender address", e)
            })?;

        info!(host = %config.host, port = config.port, tls = config.use_tls, "SMTP mailer configured");

        Ok(Self {
            transport: builder.port(config.port).build(),
            from,
            templates,
        })
    }

    fn build_message(&self, to: &str, rendered: RenderedMail) -> AppResult<Message> {
        let to: Mailbox = to.parse().map_err(|e| {
            AppError::with_source(ErrorKind::Validation, "Invalid recipient address", e)
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(rendered.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(rendered.body_text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(rendered.body_html),
                    ),
            )
            .map_err(|e| AppError::with_source(ErrorKind::Mail, "Failed to build email", e))
    }
}

#[async_trait]
impl EmailSender for SmtpMailer {
    fn transport(&self) -> &str {
        "smtp"
    }

    async fn send_verification(
        &self,
        email: &str,
        username: &str,
        confirm_url: &str,
    ) -> AppResult<()> {
        let rendered = self.templates.render(username, confirm_url)?;
        let message = self.build_message(email, rendered)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Mail, "SMTP delivery failed", e))?;

        info!(to = %email, "Verification email sent");
        Ok(())
    }
}
