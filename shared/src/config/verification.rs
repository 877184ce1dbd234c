//! Verification code policy configuration

use serde::{Deserialize, Serialize};

/// Verification code policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes before an issued code expires
    pub code_expiry_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiry_minutes: 10,
        }
    }
}

impl VerificationConfig {
    /// Load the verification policy from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_expiry_minutes: std::env::var("VERIFICATION_CODE_EXPIRY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_expiry_minutes),
        }
    }
}
