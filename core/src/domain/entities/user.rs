//! User entity representing a registered account on Muse Markets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verification::VerificationRecord;

/// A registered user.
///
/// Only the fields this subsystem reads and writes are modeled here; the
/// durable store behind the record is an external collaborator reached
/// through `UserRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Public display handle
    pub username: String,

    /// Email address under verification (or verified)
    pub email: Option<String>,

    /// Phone number in E.164 format
    pub phone: Option<String>,

    /// Dual-channel verification state
    pub verification: VerificationRecord,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with no contact details and an empty
    /// verification record
    pub fn new(username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: None,
            phone: None,
            verification: VerificationRecord::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the email address to be proven
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
        self.updated_at = Utc::now();
    }

    /// Sets the phone number to be proven (already normalized to E.164)
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = Some(phone.into());
        self.updated_at = Utc::now();
    }

    /// Whether the account has full dual-channel trust
    pub fn is_verified(&self) -> bool {
        self.verification.is_verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_unverified() {
        let user = User::new("chart_caller");
        assert_eq!(user.username, "chart_caller");
        assert!(user.email.is_none());
        assert!(user.phone.is_none());
        assert!(!user.is_verified());
    }

    #[test]
    fn test_setting_contact_details_touches_updated_at() {
        let mut user = User::new("chart_caller");
        let before = user.updated_at;
        user.set_email("fan@musemarkets.io");
        user.set_phone("+12149576425");
        assert_eq!(user.email.as_deref(), Some("fan@musemarkets.io"));
        assert_eq!(user.phone.as_deref(), Some("+12149576425"));
        assert!(user.updated_at >= before);
    }
}
