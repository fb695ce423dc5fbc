//! Operator login

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::{internal, ApiResult};
use crate::auth::staff_auth::create_token;
use crate::db::professionals::{self, Professional};
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;
use crate::util::verify_password;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub professional: Professional,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = req.email.trim().to_lowercase();
    let professional = professionals::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    if !verify_password(&req.password, &professional.hashed_password) {
        return Err(AppError::new(ErrorCode::InvalidCredentials));
    }

    let token = create_token(
        professional.id,
        &professional.email,
        professional.is_admin,
        &state.jwt_secret,
    )
    .map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(LoginResponse {
        token,
        professional,
    }))
}
