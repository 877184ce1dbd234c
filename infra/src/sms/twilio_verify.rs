//! Hosted verification client for the Twilio Verify REST API.
//!
//! The service owns code generation, storage and expiry; this client
//! only starts verifications and checks submitted codes.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use tracing::{debug, error};

use mm_shared::utils::phone::mask_phone;

use super::{VerifyProvider, VerifyStatus};
use crate::InfraError;

const VERIFY_API_BASE: &str = "https://verify.twilio.com/v2";

/// Twilio Verify client
pub struct TwilioVerifyProvider {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    service_sid: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct VerificationResource {
    sid: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct VerificationCheckResource {
    status: String,
}

impl TwilioVerifyProvider {
    pub fn new(account_sid: String, auth_token: String, service_sid: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            account_sid,
            auth_token,
            service_sid,
            base_url: VERIFY_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn auth_header(&self) -> String {
        let raw = format!("{}:{}", self.account_sid, self.auth_token);
        format!("Basic {}", BASE64.encode(raw))
    }

    fn parse_status(status: &str) -> VerifyStatus {
        match status {
            "approved" => VerifyStatus::Approved,
            "pending" => VerifyStatus::Pending,
            _ => VerifyStatus::Failed,
        }
    }
}

#[async_trait]
impl VerifyProvider for TwilioVerifyProvider {
    async fn start_verification(&self, to: &str) -> Result<String, InfraError> {
        let url = format!(
            "{}/Services/{}/Verifications",
            self.base_url, self.service_sid
        );
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .form(&[("To", to), ("Channel", "sms")])
            .send()
            .await
            .map_err(|e| InfraError::Sms(format!("verify start request failed: {e}")))?;

        if !response.status().is_success() {
            error!(
                "verify start for {} returned {}",
                mask_phone(to),
                response.status()
            );
            return Err(InfraError::Sms(format!(
                "verify start returned {}",
                response.status()
            )));
        }

        let resource: VerificationResource = response
            .json()
            .await
            .map_err(|e| InfraError::Sms(format!("verify start response invalid: {e}")))?;
        debug!(
            "verification {} started for {} ({})",
            resource.sid,
            mask_phone(to),
            resource.status
        );
        Ok(resource.sid)
    }

    async fn check_verification(&self, to: &str, code: &str) -> Result<VerifyStatus, InfraError> {
        let url = format!(
            "{}/Services/{}/VerificationCheck",
            self.base_url, self.service_sid
        );
        let response = self
            .http
            .post(&url)
            .header("Authorization", self.auth_header())
            .form(&[("To", to), ("Code", code)])
            .send()
            .await
            .map_err(|e| InfraError::Sms(format!("verify check request failed: {e}")))?;

        // Twilio answers 404 when no pending verification exists; treat
        // that as a failed check rather than a provider error
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(VerifyStatus::Failed);
        }
        if !response.status().is_success() {
            return Err(InfraError::Sms(format!(
                "verify check returned {}",
                response.status()
            )));
        }

        let resource: VerificationCheckResource = response
            .json()
            .await
            .map_err(|e| InfraError::Sms(format!("verify check response invalid: {e}")))?;
        Ok(Self::parse_status(&resource.status))
    }

    async fn fetch_verification(&self, to: &str) -> Result<VerifyStatus, InfraError> {
        let url = format!(
            "{}/Services/{}/Verifications/{}",
            self.base_url, self.service_sid, to
        );
        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| InfraError::Sms(format!("verify fetch request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(InfraError::Sms(format!(
                "verify fetch returned {}",
                response.status()
            )));
        }

        let resource: VerificationResource = response
            .json()
            .await
            .map_err(|e| InfraError::Sms(format!("verify fetch response invalid: {e}")))?;
        Ok(Self::parse_status(&resource.status))
    }
}
