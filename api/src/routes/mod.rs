//! Route handlers

pub mod verification;

use std::sync::Arc;

use mm_core::repositories::UserRepository;
use mm_core::services::delivery::DeliveryQueue;
use mm_core::services::verification::VerificationService;

/// Application state shared across handlers.
///
/// Explicit service instances, constructed once at startup and passed by
/// reference; no module-level singletons.
pub struct AppState<U: UserRepository> {
    pub verification: Arc<VerificationService<U>>,
    pub queue: Arc<DeliveryQueue>,
}
