//! Email provider implementations.
//!
//! All providers implement the core `DeliverySender` seam. The factory
//! picks one from configuration, falling back to the mock with a logged
//! warning when a real provider cannot be initialized.

use std::sync::Arc;

pub mod mock;
pub mod smtp;

pub use mock::MockEmailProvider;
pub use smtp::SmtpEmailProvider;

use mm_core::services::delivery::DeliverySender;
use mm_shared::config::EmailConfig;

/// Create an email provider based on configuration
pub fn create_email_provider(config: &EmailConfig) -> Arc<dyn DeliverySender> {
    match config.provider.as_str() {
        "smtp" => match SmtpEmailProvider::new(config) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                tracing::error!("failed to initialize SMTP email provider: {e}");
                tracing::warn!("falling back to mock email provider");
                Arc::new(MockEmailProvider::new())
            }
        },
        "mock" => Arc::new(MockEmailProvider::new()),
        other => {
            tracing::warn!("unknown email provider '{other}', using mock implementation");
            Arc::new(MockEmailProvider::new())
        }
    }
}
