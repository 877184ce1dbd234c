//! Dual-channel verification record embedded in the user entity.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::VerificationError;

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Generates a random 6-digit verification code
///
/// The value is drawn uniformly from `[100000, 999999]`, so it never has a
/// leading zero. Consecutive calls may repeat; there is no collision
/// avoidance, and the two channels' codes are generated independently.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    rng.gen_range(100_000..=999_999u32).to_string()
}

/// The two independent verification mediums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Sms => write!(f, "sms"),
        }
    }
}

/// Per-user dual-channel verification state, persisted on the user record.
///
/// Each channel moves through an implicit state machine: no code ever
/// issued, a code issued and pending, and cleared (verified). A stored code
/// is removed only by a successful verification of that channel or by being
/// overwritten on reissue. The combined `is_verified` flag is recomputed
/// whenever a channel is cleared and is true exactly when both stored codes
/// are absent at that moment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Pending email code, absent once the channel is verified
    pub email_code: Option<String>,

    /// Expiry of the pending email code
    pub email_expiry: Option<DateTime<Utc>>,

    /// Pending SMS code (or hosted-verification reference), absent once
    /// the channel is verified
    pub sms_code: Option<String>,

    /// Expiry of the pending SMS code
    pub sms_expiry: Option<DateTime<Utc>>,

    /// Combined account-level flag, true only when both channels cleared
    pub is_verified: bool,
}

impl VerificationRecord {
    /// Creates an empty record: nothing issued, not verified
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending code for a channel, if one is issued
    pub fn code(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Email => self.email_code.as_deref(),
            Channel::Sms => self.sms_code.as_deref(),
        }
    }

    /// The expiry of the pending code for a channel
    pub fn expiry(&self, channel: Channel) -> Option<DateTime<Utc>> {
        match channel {
            Channel::Email => self.email_expiry,
            Channel::Sms => self.sms_expiry,
        }
    }

    /// Whether a code is currently pending for the channel
    pub fn has_pending(&self, channel: Channel) -> bool {
        self.code(channel).is_some()
    }

    /// Records a fresh issuance for a channel.
    ///
    /// Issuance is unconditional: it overwrites any pending code and also
    /// reopens a channel that was already verified, which drops the
    /// combined flag until the new code is cleared again.
    pub fn issue(&mut self, channel: Channel, code: String, expiry: DateTime<Utc>) {
        match channel {
            Channel::Email => {
                self.email_code = Some(code);
                self.email_expiry = Some(expiry);
            }
            Channel::Sms => {
                self.sms_code = Some(code);
                self.sms_expiry = Some(expiry);
            }
        }
        self.is_verified = false;
    }

    /// Applies a confirmed code match for a channel.
    ///
    /// Rejects with `CodeExpired` when the channel's expiry has passed,
    /// leaving the stale code in place so only a reissue can recover.
    /// Otherwise clears the channel and recomputes the combined flag.
    pub fn clear_channel(
        &mut self,
        channel: Channel,
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        if let Some(expiry) = self.expiry(channel) {
            if now > expiry {
                return Err(VerificationError::CodeExpired);
            }
        }
        match channel {
            Channel::Email => {
                self.email_code = None;
                self.email_expiry = None;
            }
            Channel::Sms => {
                self.sms_code = None;
                self.sms_expiry = None;
            }
        }
        self.is_verified = self.email_code.is_none() && self.sms_code.is_none();
        Ok(())
    }

    /// Verifies a submitted code against the channel's stored code.
    ///
    /// No pending code rejects with `NoCodeIssued`; a mismatch rejects with
    /// `CodeMismatch` without mutating state; a match past expiry rejects
    /// with `CodeExpired`, also without mutating state.
    pub fn verify(
        &mut self,
        channel: Channel,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<(), VerificationError> {
        match self.code(channel) {
            None => Err(VerificationError::NoCodeIssued),
            Some(stored) if stored != submitted => Err(VerificationError::CodeMismatch),
            Some(_) => self.clear_channel(channel, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn issued_record(now: DateTime<Utc>) -> VerificationRecord {
        let mut record = VerificationRecord::new();
        record.issue(Channel::Email, "123456".to_string(), now + Duration::minutes(10));
        record.issue(Channel::Sms, "654321".to_string(), now + Duration::minutes(10));
        record
    }

    #[test]
    fn test_generate_code_range() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            let value: u32 = code.parse().expect("code must be numeric");
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_new_record_is_unverified() {
        let record = VerificationRecord::new();
        assert!(!record.is_verified);
        assert!(!record.has_pending(Channel::Email));
        assert!(!record.has_pending(Channel::Sms));
    }

    #[test]
    fn test_verify_without_issuance_rejected() {
        let mut record = VerificationRecord::new();
        let result = record.verify(Channel::Email, "123456", Utc::now());
        assert_eq!(result, Err(VerificationError::NoCodeIssued));
    }

    #[test]
    fn test_mismatch_leaves_state_unchanged() {
        let now = Utc::now();
        let mut record = issued_record(now);
        let before = record.clone();

        let result = record.verify(Channel::Email, "000000", now);
        assert_eq!(result, Err(VerificationError::CodeMismatch));
        assert_eq!(record, before);
    }

    #[test]
    fn test_both_channels_clear_in_either_order() {
        // Scenario A: email first, then SMS
        let now = Utc::now();
        let mut record = issued_record(now);

        record.verify(Channel::Email, "123456", now).unwrap();
        assert!(!record.is_verified);
        assert!(!record.has_pending(Channel::Email));
        assert!(record.has_pending(Channel::Sms));

        record.verify(Channel::Sms, "654321", now).unwrap();
        assert!(record.is_verified);

        // SMS first works just as well; no ordering between channels
        let mut record = issued_record(now);
        record.verify(Channel::Sms, "654321", now).unwrap();
        assert!(!record.is_verified);
        record.verify(Channel::Email, "123456", now).unwrap();
        assert!(record.is_verified);
    }

    #[test]
    fn test_expired_code_rejected_and_retained() {
        // Scenario B: correct code, submitted past the 10-minute expiry
        let issued_at = Utc::now();
        let mut record = issued_record(issued_at);
        let later = issued_at + Duration::minutes(11);

        let result = record.verify(Channel::Email, "123456", later);
        assert_eq!(result, Err(VerificationError::CodeExpired));
        // stale code stays; a reissue is the only way out
        assert_eq!(record.code(Channel::Email), Some("123456"));
        assert!(!record.is_verified);

        // resend issues a fresh code which then verifies
        record.issue(
            Channel::Email,
            "999999".to_string(),
            later + Duration::minutes(10),
        );
        record.verify(Channel::Email, "999999", later).unwrap();
        assert!(!record.has_pending(Channel::Email));
    }

    #[test]
    fn test_reissue_reopens_verified_channel() {
        // Scenario D: resend regresses a verified channel to pending
        let now = Utc::now();
        let mut record = issued_record(now);
        record.verify(Channel::Email, "123456", now).unwrap();
        record.verify(Channel::Sms, "654321", now).unwrap();
        assert!(record.is_verified);

        record.issue(Channel::Email, "111111".to_string(), now + Duration::minutes(10));
        assert!(record.has_pending(Channel::Email));
        assert!(!record.is_verified);

        record.verify(Channel::Email, "111111", now).unwrap();
        assert!(record.is_verified);
    }

    #[test]
    fn test_combined_flag_matches_absence_of_codes() {
        let now = Utc::now();
        let mut record = issued_record(now);

        record.verify(Channel::Email, "123456", now).unwrap();
        assert_eq!(
            record.is_verified,
            record.email_code.is_none() && record.sms_code.is_none()
        );

        record.verify(Channel::Sms, "654321", now).unwrap();
        assert_eq!(
            record.is_verified,
            record.email_code.is_none() && record.sms_code.is_none()
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let now = Utc::now();
        let record = issued_record(now);
        let json = serde_json::to_string(&record).unwrap();
        let back: VerificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
