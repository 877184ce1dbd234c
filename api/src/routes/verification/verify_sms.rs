//! Handler for POST /api/v1/verification/verify-sms

use actix_web::{web, HttpResponse};
use validator::Validate;

use mm_core::repositories::UserRepository;

use crate::dto::VerifyCodeRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::AuthenticatedUser;
use crate::routes::AppState;

/// Verify the caller's SMS channel with a submitted code.
///
/// The configured backend performs the check: a local comparison for
/// self-issued codes, or a hosted verification service call for the
/// delegated strategy.
///
/// # Request Body
///
/// ```json
/// { "code": "123456" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "isVerified": true }
/// ```
///
/// # Errors
/// - 400 Bad Request: invalid or expired code, or no code issued
/// - 401 Unauthorized: missing/invalid bearer token
/// - 404 Not Found: the authenticated user no longer exists
pub async fn verify_sms<U>(
    user: AuthenticatedUser,
    state: web::Data<AppState<U>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .verification
        .verify_sms(user.user_id, &request.code)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(error) => domain_error_response(&error),
    }
}
