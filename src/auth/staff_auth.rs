//! Professional (operator) JWT authentication for the admin API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{ApiResponse, AppError, ErrorCode};
use crate::state::AppState;

/// JWT claims for professional authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct StaffClaims {
    /// Professional ID
    pub sub: i64,
    /// Login email
    pub email: String,
    /// Administrator flag
    pub is_admin: bool,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated professional identity extracted from JWT
#[derive(Debug, Clone)]
pub struct StaffIdentity {
    pub professional_id: i64,
    pub email: String,
    pub is_admin: bool,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for a professional
pub fn create_token(
    professional_id: i64,
    email: &str,
    is_admin: bool,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = StaffClaims {
        sub: professional_id,
        email: email.to_string(),
        is_admin,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate a token, returning the embedded identity.
pub fn verify_token(token: &str, secret: &str) -> Result<StaffIdentity, AppError> {
    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<StaffClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::new(ErrorCode::TokenInvalid)
    })?;

    Ok(StaffIdentity {
        professional_id: token_data.claims.sub,
        email: token_data.claims.email,
        is_admin: token_data.claims.is_admin,
    })
}

/// Middleware that extracts and verifies the professional JWT from the
/// Authorization header, inserting a [`StaffIdentity`] extension.
pub async fn staff_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format"))?;

    let identity =
        verify_token(token, &state.jwt_secret).map_err(|e| e.into_response())?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn unauthorized(message: &str) -> Response {
    let err = AppError::with_message(ErrorCode::NotAuthenticated, message);
    let body = ApiResponse::<()>::error(&err);
    (http::StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let token = create_token(42, "ana@example.com", true, "test-secret").unwrap();
        let identity = verify_token(&token, "test-secret").unwrap();
        assert_eq!(identity.professional_id, 42);
        assert_eq!(identity.email, "ana@example.com");
        assert!(identity.is_admin);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(1, "ana@example.com", false, "secret-a").unwrap();
        let err = verify_token(&token, "secret-b").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("not.a.jwt", "secret").is_err());
    }

    #[test]
    fn expiry_is_24_hours_from_issuance() {
        let token = create_token(1, "ana@example.com", false, "secret").unwrap();
        let data = jsonwebtoken::decode::<StaffClaims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(
            data.claims.exp - data.claims.iat,
            (JWT_EXPIRY_HOURS * 3600) as usize
        );
    }
}
