//! Mock SMS providers for development and testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use mm_shared::utils::phone::mask_phone;

use super::{SmsProvider, VerifyProvider, VerifyStatus};
use crate::InfraError;

/// Mock raw messaging provider: records messages instead of sending
/// them, with scripted failure injection
#[derive(Clone)]
pub struct MockSmsProvider {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail_remaining: Arc<AtomicU32>,
}

impl MockSmsProvider {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_remaining: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Create a provider that fails the first `failures` sends
    pub fn failing_first(failures: u32) -> Self {
        let provider = Self::new();
        provider.fail_remaining.store(failures, Ordering::SeqCst);
        provider
    }

    /// `(to, body)` pairs recorded so far
    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The last message body sent to a number, if any
    pub fn last_body_to(&self, to: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(dest, _)| dest == to)
            .map(|(_, body)| body.clone())
    }
}

impl Default for MockSmsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsProvider for MockSmsProvider {
    async fn send_message(&self, to: &str, body: &str) -> Result<String, InfraError> {
        let remaining = self.fail_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_remaining.store(remaining - 1, Ordering::SeqCst);
            warn!("mock SMS provider simulating failure for {}", mask_phone(to));
            return Err(InfraError::Sms("simulated sms provider failure".to_string()));
        }

        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        let sid = format!("SM{}", Uuid::new_v4().simple());
        info!("mock SMS recorded for {} with SID {}", mask_phone(to), sid);
        Ok(sid)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

/// Mock hosted verification service.
///
/// Tracks one pending verification per phone number and approves the
/// code it "issued" for that number, mirroring a provider that owns
/// code issuance itself.
#[derive(Clone)]
pub struct MockVerifyProvider {
    pending: Arc<Mutex<HashMap<String, (String, String)>>>,
    accepted_code: String,
}

impl MockVerifyProvider {
    /// Create a provider whose verifications accept the default test
    /// code "424242"
    pub fn new() -> Self {
        Self::with_accepted_code("424242")
    }

    /// Create a provider that approves the given code for every started
    /// verification
    pub fn with_accepted_code(code: impl Into<String>) -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            accepted_code: code.into(),
        }
    }

    /// The verification reference issued for a number, if one is pending
    pub fn pending_sid(&self, to: &str) -> Option<String> {
        self.pending
            .lock()
            .unwrap()
            .get(to)
            .map(|(sid, _)| sid.clone())
    }
}

impl Default for MockVerifyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerifyProvider for MockVerifyProvider {
    async fn start_verification(&self, to: &str) -> Result<String, InfraError> {
        let sid = format!("VE{}", Uuid::new_v4().simple());
        self.pending
            .lock()
            .unwrap()
            .insert(to.to_string(), (sid.clone(), self.accepted_code.clone()));
        info!(
            "mock verification {} started for {}",
            sid,
            mask_phone(to)
        );
        Ok(sid)
    }

    async fn check_verification(&self, to: &str, code: &str) -> Result<VerifyStatus, InfraError> {
        let mut pending = self.pending.lock().unwrap();
        match pending.get(to) {
            None => Ok(VerifyStatus::Failed),
            Some((_, accepted)) if accepted == code => {
                pending.remove(to);
                Ok(VerifyStatus::Approved)
            }
            Some(_) => Ok(VerifyStatus::Pending),
        }
    }

    async fn fetch_verification(&self, to: &str) -> Result<VerifyStatus, InfraError> {
        if self.pending.lock().unwrap().contains_key(to) {
            Ok(VerifyStatus::Pending)
        } else {
            Ok(VerifyStatus::Failed)
        }
    }
}
