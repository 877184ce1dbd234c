//! Configuration for the verification service

use mm_shared::config::{SmsConfig, VerificationConfig};

use crate::domain::entities::verification::DEFAULT_EXPIRATION_MINUTES;

/// Policy knobs for issuing and checking verification codes
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Minutes before an issued code expires
    pub code_expiry_minutes: i64,
    /// Country code prepended when normalizing national numbers
    pub default_country_code: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiry_minutes: DEFAULT_EXPIRATION_MINUTES,
            default_country_code: String::from("1"),
        }
    }
}

impl VerificationServiceConfig {
    /// Assemble the service policy from the shared configuration
    pub fn from_shared(verification: &VerificationConfig, sms: &SmsConfig) -> Self {
        Self {
            code_expiry_minutes: verification.code_expiry_minutes,
            default_country_code: sms.default_country_code.clone(),
        }
    }
}
