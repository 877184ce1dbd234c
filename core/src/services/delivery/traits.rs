//! Trait seam between the delivery queue and the provider layer

use async_trait::async_trait;

use super::types::Notification;
use crate::errors::DomainError;

/// A sender that can push one notification to an external provider.
///
/// Implemented by the email providers in the infrastructure layer; the
/// queue retries through this seam and the direct send path calls it
/// once. Returns the provider message id on success.
#[async_trait]
pub trait DeliverySender: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<String, DomainError>;
}
