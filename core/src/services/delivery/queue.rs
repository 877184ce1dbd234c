//! Retrying dispatcher for outbound notifications.
//!
//! The queue guarantees that a send is attempted up to `max_attempts`
//! times with doubling delay before being dropped, without blocking the
//! caller that enqueued it. It is process-local and ephemeral: items do
//! not survive a restart, and an item that exhausts its retries is logged
//! and discarded. The enqueuer is told "accepted for delivery", never
//! "delivered".

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, error, warn};
use uuid::Uuid;

use mm_shared::config::DeliveryConfig;

use super::traits::DeliverySender;
use super::types::{Notification, QueueStatus, QueuedNotification};

struct QueueInner {
    items: VecDeque<QueuedNotification>,
    processing: bool,
}

/// Outbound delivery queue with exponential-backoff retry.
///
/// Safe only under the single-process, single-worker assumption: one
/// `run()` loop drains the queue cooperatively. Construct once, share by
/// `Arc`, and spawn `run()` at startup.
pub struct DeliveryQueue {
    sender: Arc<dyn DeliverySender>,
    config: DeliveryConfig,
    inner: Mutex<QueueInner>,
}

impl DeliveryQueue {
    pub fn new(sender: Arc<dyn DeliverySender>, config: DeliveryConfig) -> Self {
        Self {
            sender,
            config,
            inner: Mutex::new(QueueInner {
                items: VecDeque::new(),
                processing: false,
            }),
        }
    }

    /// Accept a notification for attempted delivery.
    ///
    /// Returns the queue item id immediately; delivery happens on the
    /// processing loop. Failures after this point are retried and, once
    /// retries are exhausted, dropped without notifying the caller.
    pub fn enqueue(&self, payload: Notification) -> Uuid {
        let id = Uuid::new_v4();
        let item = QueuedNotification {
            id,
            payload,
            attempts: 0,
            max_attempts: self.config.max_attempts,
            next_attempt_at: Instant::now(),
            created_at: Utc::now(),
        };
        let mut inner = self.inner.lock().unwrap();
        inner.items.push_back(item);
        debug!(queue_id = %id, queue_length = inner.items.len(), "notification enqueued");
        id
    }

    /// Snapshot of queue length and processing state
    pub fn status(&self) -> QueueStatus {
        let inner = self.inner.lock().unwrap();
        QueueStatus {
            queue_length: inner.items.len(),
            processing: inner.processing,
        }
    }

    /// Drop all pending items (administrative reset, used for test
    /// isolation)
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        let dropped = inner.items.len();
        inner.items.clear();
        if dropped > 0 {
            warn!(dropped, "delivery queue cleared");
        }
    }

    /// Processing loop. Runs forever; spawn once at startup.
    pub async fn run(&self) {
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        loop {
            self.process_pass().await;
            tokio::time::sleep(poll_interval).await;
        }
    }

    /// One cooperative pass over the queue: every item is visited once.
    /// Items not yet due are re-appended unchanged, so strict FIFO is not
    /// preserved under contention.
    async fn process_pass(&self) {
        let pass_len = {
            let mut inner = self.inner.lock().unwrap();
            if inner.items.is_empty() {
                return;
            }
            inner.processing = true;
            inner.items.len()
        };

        for _ in 0..pass_len {
            let item = self.inner.lock().unwrap().items.pop_front();
            let Some(mut item) = item else { break };

            if Instant::now() < item.next_attempt_at {
                self.inner.lock().unwrap().items.push_back(item);
                continue;
            }

            match self.sender.deliver(&item.payload).await {
                Ok(message_id) => {
                    debug!(
                        queue_id = %item.id,
                        %message_id,
                        attempts = item.attempts + 1,
                        "notification delivered"
                    );
                }
                Err(err) => {
                    item.attempts += 1;
                    if item.attempts < item.max_attempts {
                        let delay = Duration::from_secs(
                            self.config.base_delay_secs * 2u64.pow(item.attempts - 1),
                        );
                        item.next_attempt_at = Instant::now() + delay;
                        warn!(
                            queue_id = %item.id,
                            attempts = item.attempts,
                            retry_in_secs = delay.as_secs(),
                            error = %err,
                            "delivery failed, will retry"
                        );
                        self.inner.lock().unwrap().items.push_back(item);
                    } else {
                        // Terminal failure is visible only in the logs;
                        // dispatch is decoupled from the original caller.
                        error!(
                            queue_id = %item.id,
                            attempts = item.attempts,
                            error = %err,
                            "dropping notification after exhausting retries"
                        );
                    }
                }
            }
        }

        self.inner.lock().unwrap().processing = false;
    }
}
