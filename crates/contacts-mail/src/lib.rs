//! # contacts-mail
//!
//! Outbound verification email. The [`EmailSender`] trait lives in
//! `contacts-core`; this crate provides the message template and two
//! transports:
//!
//! - [`SmtpMailer`]: delivery through an SMTP relay via `lettre`
//! - [`LogMailer`]: writes the rendered message to the log, for
//!   development and for deployments with mail disabled

pub mod log;
pub mod smtp;
pub mod template;

use std::sync::Arc;

use contacts_core::config::{MailConfig, MailTransport};
use contacts_core::result::AppResult;
use contacts_core::traits::EmailSender;

pub use self::log::LogMailer;
pub use self::smtp::SmtpMailer;
pub use self::template::{RenderedMail, VerificationMail};

/// Build the sender selected by configuration.
pub fn build_sender(config: &MailConfig) -> AppResult<Arc<dyn EmailSender>> {
    let templates = VerificationMail::new()?;
    if !config.enabled {
        return Ok(Arc::new(LogMailer::new(templates)));
    }
    match config.transport {
        MailTransport::Smtp => Ok(Arc::new(SmtpMailer::new(config, templates)?)),
        MailTransport::Log => Ok(Arc::new(LogMailer::new(templates))),
    }
}
