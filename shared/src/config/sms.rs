//! SMS provider and verification backend configuration

use serde::{Deserialize, Serialize};

/// SMS configuration covering both the raw messaging provider and the
/// verification backend selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Verification backend selector: "local" (self-issued codes sent as
    /// message bodies) or "hosted" (provider-owned verification flow)
    pub backend: String,

    /// Messaging provider selector: "mock" or "twilio"
    pub provider: String,

    /// Provider account identifier (Twilio Account SID)
    pub account_sid: String,

    /// Provider auth token
    pub auth_token: String,

    /// Sender phone number in E.164 format
    pub from_number: String,

    /// Hosted verification service identifier (Twilio Verify Service SID)
    pub verify_service_sid: String,

    /// Country code prepended to national numbers, digits only (e.g. "1")
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
}

fn default_country_code() -> String {
    String::from("1")
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            backend: String::from("local"),
            provider: String::from("mock"),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::from("+15005550006"),
            verify_service_sid: String::new(),
            default_country_code: default_country_code(),
        }
    }
}

impl SmsConfig {
    /// Load the SMS configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: std::env::var("SMS_BACKEND").unwrap_or(defaults.backend),
            provider: std::env::var("SMS_PROVIDER").unwrap_or(defaults.provider),
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or(defaults.account_sid),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or(defaults.auth_token),
            from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or(defaults.from_number),
            verify_service_sid: std::env::var("TWILIO_VERIFY_SERVICE_SID")
                .unwrap_or(defaults.verify_service_sid),
            default_country_code: std::env::var("SMS_DEFAULT_COUNTRY_CODE")
                .unwrap_or(defaults.default_country_code),
        }
    }
}
