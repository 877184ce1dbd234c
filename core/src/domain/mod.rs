//! Domain layer: entities and domain rules

pub mod entities;

pub use entities::{Channel, User, VerificationRecord};
