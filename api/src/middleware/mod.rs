//! HTTP middleware: authentication and CORS

pub mod auth;
pub mod cors;

pub use auth::{issue_token, AuthenticatedUser};
pub use cors::create_cors;
