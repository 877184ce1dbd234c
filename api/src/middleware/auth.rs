//! Bearer-token authentication.
//!
//! All verification endpoints except `status` require an authenticated
//! caller; the token's `sub` claim carries the user id.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{error::InternalError, web, FromRequest, HttpRequest, HttpResponse};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mm_shared::config::JwtConfig;
use mm_shared::errors::ErrorResponse;

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Expiry as unix timestamp
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Identity extracted from a valid bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Issue an access token for a user (used by the auth flow and tests)
pub fn issue_token(user_id: Uuid, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now().timestamp()) + config.access_token_expiry,
        iss: config.issuer.clone(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

fn unauthorized(message: &str) -> actix_web::Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::Unauthorized().json(ErrorResponse::new("UNAUTHORIZED", message)),
    )
    .into()
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let config = req
        .app_data::<web::Data<JwtConfig>>()
        .ok_or_else(|| unauthorized("authentication is not configured"))?;

    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("missing authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("authorization header must be a bearer token"))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.as_str()]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|_| unauthorized("invalid or expired token"))?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| unauthorized("invalid subject claim"))?;

    Ok(AuthenticatedUser { user_id })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_round_trips() {
        let config = JwtConfig::new("test-secret");
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, &config).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.sub, user_id.to_string());
    }
}
