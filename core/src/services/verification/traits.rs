//! Trait seam between the verification service and the SMS backends

use async_trait::async_trait;

use crate::errors::DomainResult;

/// What issuing an SMS verification produced.
///
/// `stored_code` is whatever the user record must keep to finish the
/// flow later: the literal code for the self-issued backend, the
/// provider's verification reference for the hosted one. The record
/// shape is identical either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSms {
    /// Value persisted on the user record for the later check
    pub stored_code: String,
    /// Provider message/verification id for the send response
    pub message_id: String,
}

/// Verdict of checking a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsCheckOutcome {
    Approved,
    Rejected,
}

/// One uniform issue/check contract over both SMS verification
/// strategies.
///
/// Exactly one backend is selected by configuration per deployment:
/// either codes are generated locally and sent as message bodies, or a
/// hosted verification service owns issuance and checking. The two must
/// not be mixed at runtime.
#[async_trait]
pub trait SmsVerifyBackend: Send + Sync {
    /// Start a verification for a phone number (E.164).
    ///
    /// Dispatches synchronously; a provider failure surfaces to the
    /// caller as the per-channel send error.
    async fn issue(&self, phone: &str) -> DomainResult<IssuedSms>;

    /// Check a submitted code against what `issue` stored.
    ///
    /// `stored_code` is the value persisted at issue time. An error means
    /// the check itself could not run (provider failure); a `Rejected`
    /// outcome means the code is simply wrong.
    async fn check(
        &self,
        phone: &str,
        stored_code: &str,
        submitted: &str,
    ) -> DomainResult<SmsCheckOutcome>;

    /// Backend name for logs
    fn backend_name(&self) -> &str;
}
