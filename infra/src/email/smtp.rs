//! SMTP email provider.
//!
//! Delivers transactional mail through an SMTP relay using `lettre`.
//! Implements the core `DeliverySender` seam, so it serves both the
//! queued and the direct send paths.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};
use uuid::Uuid;

use mm_core::errors::DomainError;
use mm_core::services::delivery::{DeliverySender, Notification};
use mm_shared::config::EmailConfig;

use crate::InfraError;

/// SMTP-backed email provider
pub struct SmtpEmailProvider {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailProvider {
    /// Build a provider from configuration.
    ///
    /// With credentials configured the relay is reached over STARTTLS;
    /// without them a plain connection is used (development relays).
    pub fn new(config: &EmailConfig) -> Result<Self, InfraError> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
            .parse()
            .map_err(|e| InfraError::Config(format!("invalid from address: {e}")))?;

        let mailer = if config.smtp_username.is_empty() {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            let credentials = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            );
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| InfraError::Config(format!("invalid smtp relay: {e}")))?
                .port(config.smtp_port)
                .credentials(credentials)
                .build()
        };

        info!(host = %config.smtp_host, port = config.smtp_port, "smtp email provider initialized");
        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl DeliverySender for SmtpEmailProvider {
    async fn deliver(&self, notification: &Notification) -> Result<String, DomainError> {
        let to: Mailbox = notification
            .to
            .parse()
            .map_err(|e| DomainError::validation(format!("invalid recipient address: {e}")))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(notification.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                notification.text_body.clone(),
                notification.html_body.clone(),
            ))
            .map_err(|e| DomainError::provider(format!("failed to build message: {e}")))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| DomainError::provider(format!("smtp send failed: {e}")))?;

        // SMTP acceptance carries no durable message id; mint one for
        // the caller's records
        let message_id = format!("smtp-{}", Uuid::new_v4());
        debug!(to = %notification.to, %message_id, "smtp message accepted by relay");
        Ok(message_id)
    }
}
