//! Domain entities

pub mod user;
pub mod verification;

pub use user::User;
pub use verification::{Channel, VerificationRecord};
