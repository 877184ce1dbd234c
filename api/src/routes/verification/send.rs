//! Handler for POST /api/v1/verification/send

use actix_web::{web, HttpResponse};
use validator::Validate;

use mm_core::repositories::UserRepository;

use crate::dto::SendCodesRequest;
use crate::handlers::{domain_error_response, validation_error_response};
use crate::middleware::AuthenticatedUser;
use crate::routes::AppState;

/// Issue verification codes for the caller's email and phone channels.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "fan@musemarkets.io",
///     "phoneNumber": "2149576425"
/// }
/// ```
///
/// Both fields are optional; when present they replace the stored
/// contact details before issuance.
///
/// # Response
///
/// Per-channel outcomes; partial success is reported with 200:
///
/// ```json
/// {
///     "email": { "success": true },
///     "sms": { "success": true, "messageId": "SM..." }
/// }
/// ```
///
/// # Errors
/// - 400 Bad Request: malformed email or phone number
/// - 401 Unauthorized: missing/invalid bearer token
/// - 404 Not Found: the authenticated user no longer exists
pub async fn send_codes<U>(
    user: AuthenticatedUser,
    state: web::Data<AppState<U>>,
    request: web::Json<SendCodesRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let request = request.into_inner();
    match state
        .verification
        .send_codes(user.user_id, request.email, request.phone_number)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(error) => domain_error_response(&error),
    }
}
