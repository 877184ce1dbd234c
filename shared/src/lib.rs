//! Shared utilities and common types for the Muse Markets server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (phone normalization, validation)
//! - Common type definitions

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DeliveryConfig, EmailConfig, JwtConfig, ServerConfig, SmsConfig,
    VerificationConfig,
};
pub use errors::ErrorResponse;
pub use types::ApiResponse;
pub use utils::{phone, validation};
