//! Types for the outbound delivery queue

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

/// Channel-agnostic outbound notification payload.
///
/// The queue never inspects the payload; it only hands it to the injected
/// sender. For plain-text channels the HTML body is simply unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Destination address (email address or E.164 phone number)
    pub to: String,
    /// Message subject
    pub subject: String,
    /// Rich body
    pub html_body: String,
    /// Plain-text body
    pub text_body: String,
}

/// A notification waiting in the delivery queue
#[derive(Debug, Clone)]
pub struct QueuedNotification {
    /// Queue item identifier, returned to the enqueuer
    pub id: Uuid,
    /// The message to deliver
    pub payload: Notification,
    /// Failed attempts so far
    pub attempts: u32,
    /// Attempts before the item is dropped
    pub max_attempts: u32,
    /// Earliest moment the next attempt may run
    pub next_attempt_at: Instant,
    /// When the item was enqueued
    pub created_at: DateTime<Utc>,
}

/// Snapshot of the queue for observability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueStatus {
    /// Items currently waiting (or between retries)
    pub queue_length: usize,
    /// Whether a processing pass is underway
    pub processing: bool,
}

/// Result of dispatching one email through the unified send entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDispatch {
    /// Provider message id (direct mode only; queued sends report
    /// acceptance, not delivery)
    pub message_id: Option<String>,
    /// Queue item id (queued mode only)
    pub queue_id: Option<Uuid>,
}
