//! Domain-specific error types and error handling.

use thiserror::Error;

/// Per-channel verification failures surfaced to the caller
///
/// `NoCodeIssued` and `CodeMismatch` are validation-class failures; the
/// submitted code is simply wrong for the current state. `CodeExpired`
/// means the code matched but its expiry has passed; the stale code is
/// retained and only a resend can recover the channel.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("no verification code issued for this channel")]
    NoCodeIssued,

    #[error("invalid verification code")]
    CodeMismatch,

    #[error("verification code expired")]
    CodeExpired,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("validation error: {message}")]
    Validation { message: String },

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Convenience constructor for validation failures
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Convenience constructor for missing resources
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Convenience constructor for provider failures
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
