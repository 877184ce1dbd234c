//! Delivery queue configuration

use serde::{Deserialize, Serialize};

/// Retry/backoff policy for the outbound delivery queue
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Base retry delay in seconds; doubles after each failed attempt
    pub base_delay_secs: u64,

    /// Attempts before an item is dropped as permanently failed
    pub max_attempts: u32,

    /// Sleep between queue processing passes, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            base_delay_secs: 5,
            max_attempts: 3,
            poll_interval_ms: 500,
        }
    }
}

impl DeliveryConfig {
    /// Load the delivery queue configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_delay_secs: std::env::var("DELIVERY_BASE_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.base_delay_secs),
            max_attempts: std::env::var("DELIVERY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_attempts),
            poll_interval_ms: std::env::var("DELIVERY_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.poll_interval_ms),
        }
    }
}
