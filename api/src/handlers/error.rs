//! Mapping from domain errors to HTTP responses

use actix_web::HttpResponse;

use mm_core::errors::{DomainError, VerificationError};
use mm_shared::errors::ErrorResponse;

/// Translate a domain error into the standardized HTTP error response.
///
/// Verification failures are 400-class: the caller must correct the
/// code or request a resend. Provider failures on the immediate path
/// map to 502; queued retry failures never reach here because dispatch
/// is decoupled from the request cycle.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_ERROR", message))
        }
        DomainError::Verification(v) => {
            let code = match v {
                VerificationError::NoCodeIssued => "NO_CODE_ISSUED",
                VerificationError::CodeMismatch => "INVALID_VERIFICATION_CODE",
                VerificationError::CodeExpired => "VERIFICATION_CODE_EXPIRED",
            };
            HttpResponse::BadRequest().json(ErrorResponse::new(code, v.to_string()))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "NOT_FOUND",
            format!("{resource} not found"),
        )),
        DomainError::Provider { message } => {
            HttpResponse::BadGateway().json(ErrorResponse::new("PROVIDER_ERROR", message))
        }
        DomainError::Internal { message } => {
            tracing::error!("internal error: {message}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("INTERNAL_ERROR", "internal server error"))
        }
    }
}

/// Translate DTO validation failures into a 400 response
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut details = std::collections::HashMap::new();
    details.insert(
        "validation_errors".to_string(),
        serde_json::json!(errors.to_string()),
    );
    HttpResponse::BadRequest().json(ErrorResponse::with_details(
        "VALIDATION_ERROR",
        "invalid request data",
        details,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_verification_errors_are_bad_request() {
        for v in [
            VerificationError::NoCodeIssued,
            VerificationError::CodeMismatch,
            VerificationError::CodeExpired,
        ] {
            let response = domain_error_response(&DomainError::Verification(v));
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = domain_error_response(&DomainError::not_found("user"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_provider_error_maps_to_502() {
        let response = domain_error_response(&DomainError::provider("smtp down"));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
