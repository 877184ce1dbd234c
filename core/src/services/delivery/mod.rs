//! Outbound notification delivery: queue, retry policy and the unified
//! email send entry point.

mod email;
mod queue;
mod traits;
mod types;

pub use email::EmailSender;
pub use queue::DeliveryQueue;
pub use traits::DeliverySender;
pub use types::{EmailDispatch, Notification, QueueStatus, QueuedNotification};
