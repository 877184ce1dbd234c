//! Core business logic and domain layer for the Muse Markets backend
//!
//! This crate owns the verification state machine, the outbound delivery
//! queue and the service seams (repositories, providers, clock) that the
//! infrastructure layer implements.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult, VerificationError};
