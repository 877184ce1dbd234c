//! Handler for POST /api/v1/verification/verify-email

use actix_web::{web, HttpResponse};
use validator::Validate;

use mm_core::repositories::UserRepository;

use crate::dto::VerifyCodeRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::AuthenticatedUser;
use crate::routes::AppState;

/// Verify the caller's email channel with a submitted code.
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
/// { "success": true, "isVerified": false }
/// ```
///
/// `isVerified` is the combined flag after this channel cleared; it
/// turns true only once both channels are verified.
///
/// # Errors
/// - 400 Bad Request: invalid or expired code, or no code issued
/// - 401 Unauthorized: missing/invalid bearer token
/// - 404 Not Found: the authenticated user no longer exists
pub async fn verify_email<U>(
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
        .verify_email(user.user_id, &request.code)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(error) => domain_error_response(&error),
    }
}
