//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Bearer-token authentication configuration
//! - `delivery` - Outbound notification queue (retry/backoff) configuration
//! - `email` - SMTP provider and sender configuration
//! - `server` - HTTP server configuration
//! - `sms` - SMS provider and verification backend configuration
//! - `verification` - Verification code policy

pub mod auth;
pub mod delivery;
pub mod email;
pub mod server;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::JwtConfig;
pub use delivery::DeliveryConfig;
pub use email::{DeliveryMode, EmailConfig};
pub use server::ServerConfig;
pub use sms::SmsConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// SMTP / email provider configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// SMS provider and verification backend configuration
    #[serde(default)]
    pub sms: SmsConfig,

    /// Verification code policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Delivery queue configuration
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Bearer-token authentication configuration
    #[serde(default)]
    pub auth: JwtConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            email: EmailConfig::default(),
            sms: SmsConfig::default(),
            verification: VerificationConfig::default(),
            delivery: DeliveryConfig::default(),
            auth: JwtConfig::default(),
        }
    }
}

impl AppConfig {
    /// Assemble the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            email: EmailConfig::from_env(),
            sms: SmsConfig::from_env(),
            verification: VerificationConfig::from_env(),
            delivery: DeliveryConfig::from_env(),
            auth: JwtConfig::from_env(),
        }
    }
}
