//! Twilio raw SMS messaging provider.
//!
//! Single synchronous attempt per send; retry policy belongs to the
//! caller. Phone numbers are masked before logging.

use async_trait::async_trait;
use tracing::{error, info};
use twilio::{Client, OutboundMessage};

use mm_shared::config::SmsConfig;
use mm_shared::utils::phone::mask_phone;

use super::SmsProvider;
use crate::InfraError;

/// Twilio messaging provider
pub struct TwilioSmsProvider {
    client: Client,
    from_number: String,
}

impl std::fmt::Debug for TwilioSmsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioSmsProvider")
            .field("from_number", &self.from_number)
            .finish_non_exhaustive()
    }
}

impl TwilioSmsProvider {
    /// Create a provider from configuration
    pub fn new(config: &SmsConfig) -> Result<Self, InfraError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfraError::Config(
                "TWILIO_ACCOUNT_SID and TWILIO_AUTH_TOKEN must be set".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfraError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = Client::new(&config.account_sid, &config.auth_token);
        info!(
            "Twilio SMS provider initialized with from number: {}",
            mask_phone(&config.from_number)
        );
        Ok(Self {
            client,
            from_number: config.from_number.clone(),
        })
    }
}

#[async_trait]
impl SmsProvider for TwilioSmsProvider {
    async fn send_message(&self, to: &str, body: &str) -> Result<String, InfraError> {
        // Twilio rejects bodies over 1600 characters
        if body.len() > 1600 {
            return Err(InfraError::Sms(
                "message exceeds maximum length of 1600 characters".to_string(),
            ));
        }

        let message = OutboundMessage::new(&self.from_number, to, body);
        match self.client.send_message(message).await {
            Ok(response) => {
                info!(
                    "SMS sent to {} with SID: {}",
                    mask_phone(to),
                    response.sid
                );
                Ok(response.sid)
            }
            Err(e) => {
                error!("failed to send SMS to {}: {}", mask_phone(to), e);
                Err(InfraError::Sms(format!("twilio send failed: {e}")))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
