//! User repository trait defining the interface for user persistence.
//!
//! The durable store that actually holds user records is an external
//! collaborator; this trait is the seam the rest of the subsystem talks
//! through. Implementations handle the storage engine while the domain
//! stays storage-agnostic.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository contract for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - user found
    /// * `Ok(None)` - no user with that id
    /// * `Err(DomainError)` - storage error
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user record
    ///
    /// Fails with a validation error when the id is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user record, including the embedded
    /// verification fields
    ///
    /// Fails with a not-found error when the user does not exist.
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}
