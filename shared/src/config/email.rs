//! SMTP provider and sender configuration

use serde::{Deserialize, Serialize};

/// How outbound email is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Fire-and-forget through the delivery queue with retry
    Queued,
    /// Synchronous single attempt; failures surface to the caller
    Direct,
}

/// Email provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider selector: "mock" or "smtp"
    pub provider: String,

    /// SMTP server host (e.g. smtp.sendgrid.net)
    pub smtp_host: String,

    /// SMTP server port (usually 587 for STARTTLS)
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_username: String,

    /// SMTP password
    pub smtp_password: String,

    /// Sender email address
    pub from_email: String,

    /// Sender display name
    pub from_name: String,

    /// Default dispatch mode for verification email
    #[serde(default = "default_delivery_mode")]
    pub delivery_mode: DeliveryMode,
}

fn default_delivery_mode() -> DeliveryMode {
    DeliveryMode::Queued
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: String::from("noreply@musemarkets.io"),
            from_name: String::from("Muse Markets"),
            delivery_mode: default_delivery_mode(),
        }
    }
}

impl EmailConfig {
    /// Load the email configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.smtp_port),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or(defaults.smtp_username),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or(defaults.smtp_password),
            from_email: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_email),
            from_name: std::env::var("EMAIL_FROM_NAME").unwrap_or(defaults.from_name),
            delivery_mode: match std::env::var("EMAIL_DELIVERY_MODE").as_deref() {
                Ok("direct") => DeliveryMode::Direct,
                _ => DeliveryMode::Queued,
            },
        }
    }
}
