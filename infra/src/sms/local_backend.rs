//! Self-issued SMS verification backend.
//!
//! Generates its own codes, sends them as message bodies through a raw
//! messaging provider, and hands the code back for local storage. The
//! later check is a plain comparison against what was stored; no
//! provider call is involved.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use mm_core::domain::entities::verification::generate_code;
use mm_core::errors::DomainResult;
use mm_core::services::verification::{IssuedSms, SmsCheckOutcome, SmsVerifyBackend};
use mm_shared::utils::phone::mask_phone;

use super::SmsProvider;

/// Local-code verification backend over a raw messaging provider
pub struct LocalCodeBackend {
    provider: Arc<dyn SmsProvider>,
}

impl LocalCodeBackend {
    pub fn new(provider: Arc<dyn SmsProvider>) -> Self {
        Self { provider }
    }

    fn message_body(code: &str) -> String {
        format!("Your Muse Markets verification code is {code}")
    }
}

#[async_trait]
impl SmsVerifyBackend for LocalCodeBackend {
    async fn issue(&self, phone: &str) -> DomainResult<IssuedSms> {
        let code = generate_code();
        let message_id = self
            .provider
            .send_message(phone, &Self::message_body(&code))
            .await?;
        debug!(
            "self-issued code dispatched to {} via {}",
            mask_phone(phone),
            self.provider.provider_name()
        );
        Ok(IssuedSms {
            stored_code: code,
            message_id,
        })
    }

    async fn check(
        &self,
        _phone: &str,
        stored_code: &str,
        submitted: &str,
    ) -> DomainResult<SmsCheckOutcome> {
        if stored_code == submitted {
            Ok(SmsCheckOutcome::Approved)
        } else {
            Ok(SmsCheckOutcome::Rejected)
        }
    }

    fn backend_name(&self) -> &str {
        "local-code"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::MockSmsProvider;
    use mm_core::errors::DomainError;

    #[tokio::test]
    async fn test_issue_sends_code_in_body_and_returns_it() {
        let provider = Arc::new(MockSmsProvider::new());
        let backend = LocalCodeBackend::new(provider.clone());

        let issued = backend.issue("+12149576425").await.unwrap();
        assert_eq!(issued.stored_code.len(), 6);
        let body = provider.last_body_to("+12149576425").unwrap();
        assert!(body.contains(&issued.stored_code));
    }

    #[tokio::test]
    async fn test_issue_surfaces_provider_failure() {
        let provider = Arc::new(MockSmsProvider::failing_first(1));
        let backend = LocalCodeBackend::new(provider);

        let result = backend.issue("+12149576425").await;
        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_check_is_a_local_comparison() {
        let backend = LocalCodeBackend::new(Arc::new(MockSmsProvider::new()));

        let approved = backend
            .check("+12149576425", "123456", "123456")
            .await
            .unwrap();
        assert_eq!(approved, SmsCheckOutcome::Approved);

        let rejected = backend
            .check("+12149576425", "123456", "654321")
            .await
            .unwrap();
        assert_eq!(rejected, SmsCheckOutcome::Rejected);
    }
}
