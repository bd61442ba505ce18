//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// How verification emails leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Deliver through an SMTP relay.
    Smtp,
    /// Write the message to the log instead of sending it.
    #[default]
    Log,
}

/// SMTP and sender identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether outbound mail is sent at all.
    #[serde(default)]
    pub enabled: bool,
    /// Transport used when enabled.
    #[serde(default)]
    pub transport: MailTransport,
    /// SMTP server host.
    #[serde(default = "default_host")]
    pub host: String,
    /// SMTP server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// SMTP username (empty for unauthenticated relays).
    #[serde(default)]
    pub username: String,
    /// SMTP password.
    #[serde(default)]
    pub password: String,
    /// Sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Use implicit TLS / STARTTLS through the relay builder.
    #[serde(default = "default_true")]
    pub use_tls: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            transport: MailTransport::default(),
            host: default_host(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            from_address: default_from_address(),
            from_name: default_from_name(),
            use_tls: true,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    465
}

fn default_from_address() -> String {
    "noreply@localhost".to_string()
}

fn default_from_name() -> String {
    "Contacts".to_string()
}

fn default_true() -> bool {
    true
}
