//! Handler for GET /api/v1/verification/{user_id}/status

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use mm_core::repositories::UserRepository;

use crate::handlers::domain_error_response;
use crate::routes::AppState;

/// Report a user's dual-channel verification state.
///
/// The one unauthenticated verification operation; the signup flow
/// polls it before the user has a session.
///
/// # Response
///
/// ```json
/// {
///     "isVerified": false,
///     "emailVerified": true,
///     "smsVerified": false,
///     "hasEmailVerification": false,
///     "hasSMSVerification": true
/// }
/// ```
///
/// # Errors
/// - 404 Not Found: no user with that id
pub async fn status<U>(
    state: web::Data<AppState<U>>,
    user_id: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.verification.status(user_id.into_inner()).await {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(error) => domain_error_response(&error),
    }
}
