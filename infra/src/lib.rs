//! Infrastructure layer for the Muse Markets backend.
//!
//! Provider implementations behind the seams `mm_core` defines: SMTP and
//! mock email senders, Twilio and mock SMS messaging, the hosted
//! verification client, and the factories that pick an implementation
//! from configuration.

pub mod email;
pub mod sms;

use thiserror::Error;

use mm_core::errors::DomainError;

/// Infrastructure-level failures
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("email provider error: {0}")]
    Email(String),

    #[error("sms provider error: {0}")]
    Sms(String),
}

impl From<InfraError> for DomainError {
    fn from(err: InfraError) -> Self {
        DomainError::provider(err.to_string())
    }
}
