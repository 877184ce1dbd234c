//! Delegated SMS verification backend.
//!
//! A hosted verification service owns code generation, storage and
//! expiry; the user record only keeps the provider's verification
//! reference so the dual-channel state shape stays identical to the
//! local strategy.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use mm_core::errors::DomainResult;
use mm_core::services::verification::{IssuedSms, SmsCheckOutcome, SmsVerifyBackend};
use mm_shared::utils::phone::mask_phone;

use super::{VerifyProvider, VerifyStatus};

/// Hosted verification backend over a `VerifyProvider`
pub struct HostedVerificationBackend {
    provider: Arc<dyn VerifyProvider>,
}

impl HostedVerificationBackend {
    pub fn new(provider: Arc<dyn VerifyProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SmsVerifyBackend for HostedVerificationBackend {
    async fn issue(&self, phone: &str) -> DomainResult<IssuedSms> {
        let sid = self.provider.start_verification(phone).await?;
        debug!("hosted verification {} started for {}", sid, mask_phone(phone));
        Ok(IssuedSms {
            stored_code: sid.clone(),
            message_id: sid,
        })
    }

    async fn check(
        &self,
        phone: &str,
        _stored_code: &str,
        submitted: &str,
    ) -> DomainResult<SmsCheckOutcome> {
        let status = self.provider.check_verification(phone, submitted).await?;
        Ok(match status {
            VerifyStatus::Approved => SmsCheckOutcome::Approved,
            VerifyStatus::Pending | VerifyStatus::Failed => SmsCheckOutcome::Rejected,
        })
    }

    fn backend_name(&self) -> &str {
        "hosted-verification"
    }
}
