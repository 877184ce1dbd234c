//! Result types for the verification service

use serde::Serialize;

use crate::errors::DomainError;

/// Outcome of dispatching one channel's code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSendResult {
    /// Whether the channel's send was accepted/completed
    pub success: bool,
    /// Provider message id, when the send completed synchronously
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Why the channel failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChannelSendResult {
    pub fn sent(message_id: Option<String>) -> Self {
        Self {
            success: true,
            message_id,
            error: None,
        }
    }

    pub fn failed(error: &DomainError) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.to_string()),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(reason.into()),
        }
    }
}

/// Per-channel outcomes of a send/resend request.
///
/// Partial success is normal: one channel failing never blocks the
/// other's result from being reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendCodesResult {
    pub email: ChannelSendResult,
    pub sms: ChannelSendResult,
}

/// Outcome of a successful single-channel verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOutcome {
    pub success: bool,
    /// Combined flag after this channel cleared
    pub is_verified: bool,
}

/// Snapshot of a user's dual-channel verification state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatus {
    pub is_verified: bool,
    pub email_verified: bool,
    pub sms_verified: bool,
    #[serde(rename = "hasEmailVerification")]
    pub has_email_verification: bool,
    #[serde(rename = "hasSMSVerification")]
    pub has_sms_verification: bool,
}
