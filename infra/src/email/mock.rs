//! Mock email provider for development and testing.
//!
//! Records messages instead of sending them and can simulate a scripted
//! number of leading failures, which is how the queue's retry path is
//! exercised without a real relay.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use mm_core::errors::DomainError;
use mm_core::services::delivery::{DeliverySender, Notification};

/// Mock email provider
#[derive(Clone)]
pub struct MockEmailProvider {
    sent: Arc<Mutex<Vec<Notification>>>,
    attempt_count: Arc<AtomicU64>,
    fail_remaining: Arc<AtomicU32>,
}

impl MockEmailProvider {
    /// Create a provider that always succeeds
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            attempt_count: Arc::new(AtomicU64::new(0)),
            fail_remaining: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Create a provider that fails the first `failures` submissions
    pub fn failing_first(failures: u32) -> Self {
        let provider = Self::new();
        provider.fail_remaining.store(failures, Ordering::SeqCst);
        provider
    }

    /// Messages delivered so far
    pub fn sent_messages(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    /// Total submissions attempted, including failed ones
    pub fn attempt_count(&self) -> u64 {
        self.attempt_count.load(Ordering::SeqCst)
    }

    /// The last message body delivered to a recipient, if any
    pub fn last_message_to(&self, recipient: &str) -> Option<Notification> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|n| n.to == recipient)
            .cloned()
    }
}

impl Default for MockEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliverySender for MockEmailProvider {
    async fn deliver(&self, notification: &Notification) -> Result<String, DomainError> {
        self.attempt_count.fetch_add(1, Ordering::SeqCst);

        let remaining = self.fail_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_remaining.store(remaining - 1, Ordering::SeqCst);
            warn!(to = %notification.to, "mock email provider simulating failure");
            return Err(DomainError::provider("simulated email provider failure"));
        }

        self.sent.lock().unwrap().push(notification.clone());
        let message_id = format!("mock-email-{}", Uuid::new_v4());
        info!(to = %notification.to, subject = %notification.subject, %message_id, "mock email recorded");
        Ok(message_id)
    }
}
