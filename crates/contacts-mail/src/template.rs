//! Handlebars rendering of the verification message.

use handlebars::Handlebars;
use serde::Serialize;

use contacts_core::error::{AppError, ErrorKind};

/// Subject line of the verification message.
pub const SUBJECT: &str = "Confirm your email";

const HTML_TEMPLATE: &str = "verification_html";
const TEXT_TEMPLATE: &str = "verification_text";

/// A message ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct RenderedMail {
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

#[derive(Serialize)]
struct VerificationContext<'a> {
    username: &'a str,
    confirm_url: &'a str,
}

/// Compiled verification templates.
#[derive(Debug, Clone)]
pub struct VerificationMail {
    handlebars: Handlebars<'static>,
}

impl VerificationMail {
    /// Compile the bundled templates.
    pub fn new() -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars
            .register_template_string(
                HTML_TEMPLATE,
                include_str!("../templates/verification.html.hbs"),
            )
            .map_err(|e| template_error("HTML", e))?;
        handlebars
            .register_template_string(
                TEXT_TEMPLATE,
                include_str!("../templates/verification.txt.hbs"),
            )
            .map_err(|e| template_error("text", e))?;

        Ok(Self { handlebars })
    }

    /// Render both bodies for one recipient.
    pub fn render(&self, username: &str, confirm_url: &str) -> Result<RenderedMail, AppError> {
        let ctx = VerificationContext {
            username,
            confirm_url,
        };
        let body_html = self
            .handlebars
            .render(HTML_TEMPLATE, &ctx)
            .map_err(|e| AppError::with_source(ErrorKind::Mail, "Failed to render email", e))?;
        let body_text = self
            .handlebars
            .render(TEXT_TEMPLATE, &ctx)
            .map_err(|e| AppError::with_source(ErrorKind::Mail, "Failed to render email", e))?;

        Ok(RenderedMail {
            subject: SUBJECT.to_string(),
            body_text,
            body_html,
        })
    }
}

fn template_error(kind: &str, e: handlebars::TemplateError) -> AppError {
    AppError::with_source(
        ErrorKind::Mail,
        format!("Invalid {kind} verification template"),
        e,
    )
}
