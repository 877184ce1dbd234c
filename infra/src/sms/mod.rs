//! SMS provider implementations and verification backends.
//!
//! Two provider seams live here: `SmsProvider` for raw outbound
//! messaging and `VerifyProvider` for hosted verification services that
//! own code issuance themselves. The two verification strategies are
//! wrapped by `LocalCodeBackend` and `HostedVerificationBackend`, both
//! implementing the core `SmsVerifyBackend` contract; the factory picks
//! exactly one per deployment.

use std::sync::Arc;

use async_trait::async_trait;

use mm_core::services::verification::SmsVerifyBackend;
use mm_shared::config::SmsConfig;

use crate::InfraError;

pub mod hosted_backend;
pub mod local_backend;
pub mod mock;
#[cfg(feature = "twilio-sms")]
pub mod twilio;
pub mod twilio_verify;

pub use hosted_backend::HostedVerificationBackend;
pub use local_backend::LocalCodeBackend;
pub use mock::{MockSmsProvider, MockVerifyProvider};
#[cfg(feature = "twilio-sms")]
pub use twilio::TwilioSmsProvider;
pub use twilio_verify::TwilioVerifyProvider;

/// Raw SMS messaging provider (self-issued code strategy)
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Send a message body to an E.164 number, returning the provider
    /// message id
    async fn send_message(&self, to: &str, body: &str) -> Result<String, InfraError>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}

/// Status a hosted verification service reports for a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStatus {
    Approved,
    Pending,
    Failed,
}

/// Hosted verification service (delegated strategy); the provider owns
/// code generation, storage and expiry
#[async_trait]
pub trait VerifyProvider: Send + Sync {
    /// Start a verification for a phone number, returning the provider's
    /// verification reference
    async fn start_verification(&self, to: &str) -> Result<String, InfraError>;

    /// Check a submitted code for a phone number
    async fn check_verification(&self, to: &str, code: &str) -> Result<VerifyStatus, InfraError>;

    /// Fetch the current status of a verification
    async fn fetch_verification(&self, to: &str) -> Result<VerifyStatus, InfraError>;
}

/// Create the configured SMS verification backend.
///
/// `backend = "local"` wires the self-issued strategy over a messaging
/// provider; `backend = "hosted"` wires the delegated strategy over a
/// verification service. Unknown values fall back to the local strategy
/// over the mock provider.
pub fn create_sms_backend(config: &SmsConfig) -> Arc<dyn SmsVerifyBackend> {
    match config.backend.as_str() {
        "hosted" => {
            let provider: Arc<dyn VerifyProvider> = match config.provider.as_str() {
                "twilio" => Arc::new(TwilioVerifyProvider::new(
                    config.account_sid.clone(),
                    config.auth_token.clone(),
                    config.verify_service_sid.clone(),
                )),
                _ => Arc::new(MockVerifyProvider::new()),
            };
            Arc::new(HostedVerificationBackend::new(provider))
        }
        "local" => Arc::new(LocalCodeBackend::new(create_sms_provider(config))),
        other => {
            tracing::warn!("unknown sms backend '{other}', using local strategy");
            Arc::new(LocalCodeBackend::new(create_sms_provider(config)))
        }
    }
}

/// Create a raw messaging provider based on configuration
pub fn create_sms_provider(config: &SmsConfig) -> Arc<dyn SmsProvider> {
    match config.provider.as_str() {
        #[cfg(feature = "twilio-sms")]
        "twilio" => match TwilioSmsProvider::new(config) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                tracing::error!("failed to initialize Twilio SMS provider: {e}");
                tracing::warn!("falling back to mock SMS provider");
                Arc::new(MockSmsProvider::new())
            }
        },
        "mock" => Arc::new(MockSmsProvider::new()),
        other => {
            tracing::warn!("unknown sms provider '{other}', using mock implementation");
            Arc::new(MockSmsProvider::new())
        }
    }
}
