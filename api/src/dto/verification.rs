//! Request DTOs for the verification endpoints.
//!
//! Wire field names are camelCase per the frontend contract; response
//! bodies are the serialized core result types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of POST /api/v1/verification/send
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendCodesRequest {
    /// Email address to verify; replaces the stored one when present
    #[validate(email)]
    pub email: Option<String>,

    /// Phone number to verify; normalized to E.164 before dispatch
    #[validate(length(min = 7, max = 17))]
    pub phone_number: Option<String>,
}

/// Body of POST /api/v1/verification/verify-email and /verify-sms
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub code: String,
}
