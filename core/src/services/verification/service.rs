//! Dual-channel verification workflow.
//!
//! Orchestrates code issuance and checking across the email and SMS
//! channels, persisting the resulting state on the user record. Channel
//! providers, the user store and the clock are all injected, so the
//! whole flow runs against mocks in tests.

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use mm_shared::utils::{phone, validation};

use crate::domain::entities::user::User;
use crate::domain::entities::verification::{generate_code, Channel};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::UserRepository;
use crate::services::clock::Clock;
use crate::services::delivery::EmailSender;

use super::config::VerificationServiceConfig;
use super::traits::{SmsCheckOutcome, SmsVerifyBackend};
use super::types::{ChannelSendResult, SendCodesResult, VerificationStatus, VerifyOutcome};

/// Verification service over an injected user store, SMS backend and
/// clock.
///
/// The SMS backend and the clock are trait objects because they are
/// chosen once by configuration; the user store stays generic so a
/// deployment can plug its own repository implementation.
pub struct VerificationService<U: UserRepository> {
    users: Arc<U>,
    sms: Arc<dyn SmsVerifyBackend>,
    email: Arc<EmailSender>,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl<U: UserRepository> VerificationService<U> {
    pub fn new(
        users: Arc<U>,
        sms: Arc<dyn SmsVerifyBackend>,
        email: Arc<EmailSender>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            users,
            sms,
            email,
            clock,
            config,
        }
    }

    /// Issue verification codes for both channels.
    ///
    /// `email` / `phone` optionally update the contact details being
    /// proven; the stored ones are used otherwise. Issuance is
    /// unconditional per channel, so this also reopens channels that
    /// were already verified. The two dispatches run concurrently and
    /// each reports its own outcome; partial success is normal.
    pub async fn send_codes(
        &self,
        user_id: Uuid,
        email: Option<String>,
        phone: Option<String>,
    ) -> DomainResult<SendCodesResult> {
        let mut user = self.require_user(user_id).await?;

        if let Some(email) = email {
            if !validation::is_valid_email(&email) {
                return Err(DomainError::validation("invalid email address"));
            }
            user.set_email(email);
        }
        if let Some(phone_raw) = phone {
            let normalized =
                phone::normalize_to_e164(&phone_raw, &self.config.default_country_code);
            if !phone::is_valid_e164(&normalized) {
                return Err(DomainError::validation("invalid phone number"));
            }
            user.set_phone(normalized);
        }

        let result = self.issue_both_channels(&mut user).await;
        self.users.update(&user).await?;
        Ok(result)
    }

    /// Reissue codes for both channels from the stored contact details.
    ///
    /// Overwrites any pending codes and reopens already-verified
    /// channels (current product behavior).
    pub async fn resend(&self, user_id: Uuid) -> DomainResult<SendCodesResult> {
        let mut user = self.require_user(user_id).await?;
        let result = self.issue_both_channels(&mut user).await;
        self.users.update(&user).await?;
        Ok(result)
    }

    /// Verify the email channel with a submitted code
    pub async fn verify_email(&self, user_id: Uuid, code: &str) -> DomainResult<VerifyOutcome> {
        let mut user = self.require_user(user_id).await?;

        user.verification
            .verify(Channel::Email, code, self.clock.now())?;
        self.users.update(&user).await?;

        info!(user_id = %user.id, is_verified = user.verification.is_verified, "email channel verified");
        Ok(VerifyOutcome {
            success: true,
            is_verified: user.verification.is_verified,
        })
    }

    /// Verify the SMS channel with a submitted code.
    ///
    /// The configured backend decides whether the code matches (a local
    /// comparison or a hosted check); expiry is enforced here either
    /// way, lazily, at the moment of use.
    pub async fn verify_sms(&self, user_id: Uuid, code: &str) -> DomainResult<VerifyOutcome> {
        let mut user = self.require_user(user_id).await?;

        let phone = user
            .phone
            .clone()
            .ok_or_else(|| DomainError::validation("no phone number on file"))?;
        let stored = user
            .verification
            .code(Channel::Sms)
            .map(str::to_string)
            .ok_or(VerificationError::NoCodeIssued)?;

        match self.sms.check(&phone, &stored, code).await? {
            SmsCheckOutcome::Rejected => Err(VerificationError::CodeMismatch.into()),
            SmsCheckOutcome::Approved => {
                user.verification
                    .clear_channel(Channel::Sms, self.clock.now())?;
                self.users.update(&user).await?;

                info!(user_id = %user.id, is_verified = user.verification.is_verified, "sms channel verified");
                Ok(VerifyOutcome {
                    success: true,
                    is_verified: user.verification.is_verified,
                })
            }
        }
    }

    /// Report the user's dual-channel verification state
    pub async fn status(&self, user_id: Uuid) -> DomainResult<VerificationStatus> {
        let user = self.require_user(user_id).await?;
        let v = &user.verification;
        Ok(VerificationStatus {
            is_verified: v.is_verified,
            email_verified: v.email_code.is_none(),
            sms_verified: v.sms_code.is_none(),
            has_email_verification: v.email_code.is_some(),
            has_sms_verification: v.sms_code.is_some(),
        })
    }

    async fn require_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    /// Dispatch both channels concurrently and record the issuances.
    ///
    /// The email code is persisted whenever the channel was attempted,
    /// even if a direct-mode send failed; the SMS code comes back from
    /// the backend, so a failed issue leaves that channel without a
    /// pending code.
    async fn issue_both_channels(&self, user: &mut User) -> SendCodesResult {
        let expiry = self.clock.now() + Duration::minutes(self.config.code_expiry_minutes);

        let email_task = async {
            match user.email.as_deref() {
                None => None,
                Some(address) => {
                    let code = generate_code();
                    let outcome = self
                        .email
                        .send_verification_code(address, &code, self.config.code_expiry_minutes)
                        .await;
                    let result = match outcome {
                        Ok(dispatch) => ChannelSendResult::sent(dispatch.message_id),
                        Err(err) => {
                            warn!(user_id = %user.id, error = %err, "email dispatch failed");
                            ChannelSendResult::failed(&err)
                        }
                    };
                    Some((code, result))
                }
            }
        };

        let sms_task = async {
            match user.phone.as_deref() {
                None => None,
                Some(number) => match self.sms.issue(number).await {
                    Ok(issued) => Some((
                        Some(issued.stored_code),
                        ChannelSendResult::sent(Some(issued.message_id)),
                    )),
                    Err(err) => {
                        warn!(
                            user_id = %user.id,
                            phone = %phone::mask_phone(number),
                            error = %err,
                            "sms dispatch failed"
                        );
                        Some((None, ChannelSendResult::failed(&err)))
                    }
                },
            }
        };

        // both channels are dispatched before either is awaited; one
        // slow or failing channel never blocks the other's outcome
        let (email_outcome, sms_outcome) = tokio::join!(email_task, sms_task);

        let mut result = SendCodesResult {
            email: ChannelSendResult::skipped("no email address on file"),
            sms: ChannelSendResult::skipped("no phone number on file"),
        };

        if let Some((code, send_result)) = email_outcome {
            user.verification.issue(Channel::Email, code, expiry);
            result.email = send_result;
        }
        if let Some((stored, send_result)) = sms_outcome {
            if let Some(stored) = stored {
                user.verification.issue(Channel::Sms, stored, expiry);
            }
            result.sms = send_result;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VerificationError;
    use crate::repositories::InMemoryUserRepository;
    use crate::services::clock::FixedClock;
    use crate::services::delivery::{DeliveryQueue, DeliverySender, Notification};
    use crate::services::verification::traits::IssuedSms;
    use async_trait::async_trait;
    use mm_shared::config::{DeliveryConfig, DeliveryMode};
    use std::sync::Mutex;

    struct StubEmailProvider {
        sent: Mutex<Vec<Notification>>,
        fail: bool,
    }

    impl StubEmailProvider {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl DeliverySender for StubEmailProvider {
        async fn deliver(&self, notification: &Notification) -> Result<String, DomainError> {
            if self.fail {
                return Err(DomainError::provider("smtp unavailable"));
            }
            self.sent.lock().unwrap().push(notification.clone());
            Ok("email-msg-1".to_string())
        }
    }

    struct StubSmsBackend {
        issued: Mutex<Vec<String>>,
        fail_issue: bool,
    }

    impl StubSmsBackend {
        fn new(fail_issue: bool) -> Self {
            Self {
                issued: Mutex::new(Vec::new()),
                fail_issue,
            }
        }
    }

    #[async_trait]
    impl SmsVerifyBackend for StubSmsBackend {
        async fn issue(&self, _phone: &str) -> DomainResult<IssuedSms> {
            if self.fail_issue {
                return Err(DomainError::provider("sms gateway down"));
            }
            let code = generate_code();
            self.issued.lock().unwrap().push(code.clone());
            Ok(IssuedSms {
                stored_code: code,
                message_id: "SM123".to_string(),
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
            "stub"
        }
    }

    struct Harness {
        users: Arc<InMemoryUserRepository>,
        clock: Arc<FixedClock>,
        service: VerificationService<InMemoryUserRepository>,
    }

    fn harness(email_fails: bool, sms_fails: bool) -> Harness {
        let users = Arc::new(InMemoryUserRepository::new());
        let clock = Arc::new(FixedClock::at_system_time());
        let provider = Arc::new(StubEmailProvider::new(email_fails));
        let queue = Arc::new(DeliveryQueue::new(
            provider.clone(),
            DeliveryConfig::default(),
        ));
        let email = Arc::new(EmailSender::new(provider, queue, DeliveryMode::Direct));
        let sms = Arc::new(StubSmsBackend::new(sms_fails));
        let service = VerificationService::new(
            users.clone(),
            sms,
            email,
            clock.clone(),
            VerificationServiceConfig::default(),
        );
        Harness {
            users,
            clock,
            service,
        }
    }

    async fn seeded_user(h: &Harness) -> User {
        let mut user = User::new("chart_caller");
        user.set_email("fan@musemarkets.io");
        user.set_phone("+12149576425");
        h.users.create(user.clone()).await.unwrap()
    }

    async fn stored_codes(h: &Harness, user_id: Uuid) -> (Option<String>, Option<String>) {
        let user = h.users.find_by_id(user_id).await.unwrap().unwrap();
        (user.verification.email_code, user.verification.sms_code)
    }

    #[tokio::test]
    async fn test_scenario_a_verify_email_then_sms() {
        let h = harness(false, false);
        let user = seeded_user(&h).await;

        let sent = h.service.send_codes(user.id, None, None).await.unwrap();
        assert!(sent.email.success);
        assert!(sent.sms.success);
        assert_eq!(sent.sms.message_id.as_deref(), Some("SM123"));

        let (email_code, sms_code) = stored_codes(&h, user.id).await;
        let email_code = email_code.unwrap();
        let sms_code = sms_code.unwrap();
        // the two channels' codes are generated independently
        assert_eq!(email_code.len(), 6);
        assert_eq!(sms_code.len(), 6);

        let outcome = h.service.verify_email(user.id, &email_code).await.unwrap();
        assert!(outcome.success);
        assert!(!outcome.is_verified);

        let outcome = h.service.verify_sms(user.id, &sms_code).await.unwrap();
        assert!(outcome.success);
        assert!(outcome.is_verified);

        let status = h.service.status(user.id).await.unwrap();
        assert!(status.is_verified);
        assert!(status.email_verified && status.sms_verified);
        assert!(!status.has_email_verification && !status.has_sms_verification);
    }

    #[tokio::test]
    async fn test_scenario_b_expired_code_requires_resend() {
        let h = harness(false, false);
        let user = seeded_user(&h).await;

        h.service.send_codes(user.id, None, None).await.unwrap();
        let (email_code, _) = stored_codes(&h, user.id).await;
        let email_code = email_code.unwrap();

        // 11 minutes later the correct code is rejected and retained
        h.clock.advance(Duration::minutes(11));
        let result = h.service.verify_email(user.id, &email_code).await;
        assert!(matches!(
            result,
            Err(DomainError::Verification(VerificationError::CodeExpired))
        ));
        let (still_stored, _) = stored_codes(&h, user.id).await;
        assert_eq!(still_stored.as_deref(), Some(email_code.as_str()));

        // resend issues a fresh code which verifies fine
        h.service.resend(user.id).await.unwrap();
        let (fresh_code, _) = stored_codes(&h, user.id).await;
        let outcome = h
            .service
            .verify_email(user.id, &fresh_code.unwrap())
            .await
            .unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn test_scenario_d_resend_reopens_verified_channel() {
        let h = harness(false, false);
        let user = seeded_user(&h).await;

        h.service.send_codes(user.id, None, None).await.unwrap();
        let (email_code, sms_code) = stored_codes(&h, user.id).await;
        h.service
            .verify_email(user.id, &email_code.unwrap())
            .await
            .unwrap();
        let outcome = h
            .service
            .verify_sms(user.id, &sms_code.unwrap())
            .await
            .unwrap();
        assert!(outcome.is_verified);

        // resend regresses both channels to pending
        h.service.resend(user.id).await.unwrap();
        let status = h.service.status(user.id).await.unwrap();
        assert!(!status.is_verified);
        assert!(status.has_email_verification);
        assert!(status.has_sms_verification);
    }

    #[tokio::test]
    async fn test_wrong_code_rejected_without_state_change() {
        let h = harness(false, false);
        let user = seeded_user(&h).await;

        h.service.send_codes(user.id, None, None).await.unwrap();
        let before = stored_codes(&h, user.id).await;

        let result = h.service.verify_email(user.id, "000000").await;
        assert!(matches!(
            result,
            Err(DomainError::Verification(VerificationError::CodeMismatch))
        ));
        let result = h.service.verify_sms(user.id, "000000").await;
        assert!(matches!(
            result,
            Err(DomainError::Verification(VerificationError::CodeMismatch))
        ));

        assert_eq!(stored_codes(&h, user.id).await, before);
    }

    #[tokio::test]
    async fn test_verify_without_issuance_is_validation_class() {
        let h = harness(false, false);
        let user = seeded_user(&h).await;

        let result = h.service.verify_email(user.id, "123456").await;
        assert!(matches!(
            result,
            Err(DomainError::Verification(VerificationError::NoCodeIssued))
        ));
    }

    #[tokio::test]
    async fn test_partial_success_when_one_channel_fails() {
        let h = harness(true, false);
        let user = seeded_user(&h).await;

        let sent = h.service.send_codes(user.id, None, None).await.unwrap();
        assert!(!sent.email.success);
        assert!(sent.email.error.is_some());
        assert!(sent.sms.success);

        // the email code is still on record; only the dispatch failed
        let (email_code, sms_code) = stored_codes(&h, user.id).await;
        assert!(email_code.is_some());
        assert!(sms_code.is_some());
    }

    #[tokio::test]
    async fn test_failed_sms_issue_leaves_channel_unissued() {
        let h = harness(false, true);
        let user = seeded_user(&h).await;

        let sent = h.service.send_codes(user.id, None, None).await.unwrap();
        assert!(sent.email.success);
        assert!(!sent.sms.success);

        let (_, sms_code) = stored_codes(&h, user.id).await;
        assert!(sms_code.is_none());

        let result = h.service.verify_sms(user.id, "123456").await;
        assert!(matches!(
            result,
            Err(DomainError::Verification(VerificationError::NoCodeIssued))
        ));
    }

    #[tokio::test]
    async fn test_send_normalizes_and_stores_contact_details() {
        let h = harness(false, false);
        let user = h.users.create(User::new("chart_caller")).await.unwrap();

        let sent = h
            .service
            .send_codes(
                user.id,
                Some("fan@musemarkets.io".to_string()),
                Some("2149576425".to_string()),
            )
            .await
            .unwrap();
        assert!(sent.email.success && sent.sms.success);

        let stored = h.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.phone.as_deref(), Some("+12149576425"));
        assert_eq!(stored.email.as_deref(), Some("fan@musemarkets.io"));
    }

    #[tokio::test]
    async fn test_send_rejects_bad_contact_details() {
        let h = harness(false, false);
        let user = h.users.create(User::new("chart_caller")).await.unwrap();

        let result = h
            .service
            .send_codes(user.id, Some("not-an-email".to_string()), None)
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let h = harness(false, false);
        let missing = Uuid::new_v4();

        assert!(matches!(
            h.service.send_codes(missing, None, None).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            h.service.verify_email(missing, "123456").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            h.service.status(missing).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_send_without_contact_details_reports_both_skipped() {
        let h = harness(false, false);
        let user = h.users.create(User::new("chart_caller")).await.unwrap();

        let sent = h.service.send_codes(user.id, None, None).await.unwrap();
        assert!(!sent.email.success);
        assert!(!sent.sms.success);
    }
}
