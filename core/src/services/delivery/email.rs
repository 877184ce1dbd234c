//! Unified email send entry point.
//!
//! There is exactly one way to send email out of the subsystem; callers
//! pick between fire-and-forget (through the retrying queue) and a
//! synchronous single attempt whose failure surfaces immediately.

use std::sync::Arc;

use tracing::info;

use mm_shared::config::DeliveryMode;

use super::queue::DeliveryQueue;
use super::traits::DeliverySender;
use super::types::{EmailDispatch, Notification};
use crate::errors::DomainResult;

/// Composes transactional verification email and dispatches it in the
/// configured mode
pub struct EmailSender {
    provider: Arc<dyn DeliverySender>,
    queue: Arc<DeliveryQueue>,
    mode: DeliveryMode,
}

impl EmailSender {
    pub fn new(
        provider: Arc<dyn DeliverySender>,
        queue: Arc<DeliveryQueue>,
        mode: DeliveryMode,
    ) -> Self {
        Self {
            provider,
            queue,
            mode,
        }
    }

    /// Build the verification-code message for a recipient.
    ///
    /// Branding and rich templating live with the frontend team; this is
    /// the minimal transactional body.
    pub fn compose_verification_email(
        recipient: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> Notification {
        Notification {
            to: recipient.to_string(),
            subject: "Your Muse Markets verification code".to_string(),
            html_body: format!(
                "<p>Your Muse Markets verification code is <strong>{code}</strong>.</p>\
                 <p>It expires in {expiry_minutes} minutes. If you did not request it, \
                 you can ignore this message.</p>"
            ),
            text_body: format!(
                "Your Muse Markets verification code is {code}. \
                 It expires in {expiry_minutes} minutes."
            ),
        }
    }

    /// Dispatch a message in an explicit mode.
    ///
    /// Queued mode reports acceptance (a queue id, no provider message
    /// id); retry failures after acceptance never reach the caller.
    /// Direct mode performs one synchronous attempt and propagates the
    /// provider error.
    pub async fn send(
        &self,
        notification: Notification,
        mode: DeliveryMode,
    ) -> DomainResult<EmailDispatch> {
        match mode {
            DeliveryMode::Queued => {
                let queue_id = self.queue.enqueue(notification);
                info!(%queue_id, "email accepted for delivery");
                Ok(EmailDispatch {
                    message_id: None,
                    queue_id: Some(queue_id),
                })
            }
            DeliveryMode::Direct => {
                let message_id = self.provider.deliver(&notification).await?;
                info!(%message_id, "email delivered directly");
                Ok(EmailDispatch {
                    message_id: Some(message_id),
                    queue_id: None,
                })
            }
        }
    }

    /// Compose and dispatch a verification code in the configured mode
    pub async fn send_verification_code(
        &self,
        recipient: &str,
        code: &str,
        expiry_minutes: i64,
    ) -> DomainResult<EmailDispatch> {
        let notification = Self::compose_verification_email(recipient, code, expiry_minutes);
        self.send(notification, self.mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use async_trait::async_trait;
    use mm_shared::config::DeliveryConfig;
    use std::sync::Mutex;

    struct CapturingProvider {
        sent: Mutex<Vec<Notification>>,
        fail: bool,
    }

    impl CapturingProvider {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl DeliverySender for CapturingProvider {
        async fn deliver(&self, notification: &Notification) -> Result<String, DomainError> {
            if self.fail {
                return Err(DomainError::provider("mailbox unavailable"));
            }
            self.sent.lock().unwrap().push(notification.clone());
            Ok("msg-1".to_string())
        }
    }

    fn sender_with(fail: bool, mode: DeliveryMode) -> (EmailSender, Arc<CapturingProvider>, Arc<DeliveryQueue>) {
        let provider = Arc::new(CapturingProvider::new(fail));
        let queue = Arc::new(DeliveryQueue::new(
            provider.clone(),
            DeliveryConfig::default(),
        ));
        let sender = EmailSender::new(provider.clone(), queue.clone(), mode);
        (sender, provider, queue)
    }

    #[test]
    fn test_compose_contains_code_and_expiry() {
        let message =
            EmailSender::compose_verification_email("fan@musemarkets.io", "123456", 10);
        assert_eq!(message.to, "fan@musemarkets.io");
        assert!(message.html_body.contains("123456"));
        assert!(message.text_body.contains("123456"));
        assert!(message.text_body.contains("10 minutes"));
    }

    #[tokio::test]
    async fn test_direct_mode_returns_provider_message_id() {
        let (sender, provider, _queue) = sender_with(false, DeliveryMode::Direct);

        let dispatch = sender
            .send_verification_code("fan@musemarkets.io", "123456", 10)
            .await
            .unwrap();
        assert_eq!(dispatch.message_id.as_deref(), Some("msg-1"));
        assert!(dispatch.queue_id.is_none());
        assert_eq!(provider.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_direct_mode_surfaces_provider_failure() {
        let (sender, _provider, _queue) = sender_with(true, DeliveryMode::Direct);

        let result = sender
            .send_verification_code("fan@musemarkets.io", "123456", 10)
            .await;
        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_queued_mode_reports_acceptance_only() {
        // even a failing provider cannot fail an enqueue
        let (sender, provider, queue) = sender_with(true, DeliveryMode::Queued);

        let dispatch = sender
            .send_verification_code("fan@musemarkets.io", "123456", 10)
            .await
            .unwrap();
        assert!(dispatch.message_id.is_none());
        assert!(dispatch.queue_id.is_some());
        assert_eq!(queue.status().queue_length, 1);
        assert!(provider.sent.lock().unwrap().is_empty());
    }
}
