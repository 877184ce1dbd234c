//! Handler for POST /api/v1/verification/resend

use actix_web::{web, HttpResponse};

use mm_core::repositories::UserRepository;

use crate::handlers::domain_error_response;
use crate::middleware::AuthenticatedUser;
use crate::routes::AppState;

/// Reissue verification codes for both channels from the stored contact
/// details.
///
/// Takes no body. Issuance is unconditional: pending codes are
/// overwritten and an already-verified channel is reopened with a fresh
/// code.
///
/// # Response
///
/// Per-channel send results, identical in shape to `/send`.
///
/// # Errors
/// - 401 Unauthorized: missing/invalid bearer token
/// - 404 Not Found: the authenticated user no longer exists
pub async fn resend<U>(
    user: AuthenticatedUser,
    state: web::Data<AppState<U>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.verification.resend(user.user_id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(error) => domain_error_response(&error),
    }
}
