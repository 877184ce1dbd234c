//! Request/response DTOs

pub mod verification;

pub use verification::{SendCodesRequest, VerifyCodeRequest};
