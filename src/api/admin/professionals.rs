//! Team (professional) management

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::api::{internal, ApiResult};
use crate::auth::staff_auth::StaffIdentity;
use crate::db::professionals::{self, Professional};
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;
use crate::util::hash_password;

use super::{require_admin, require_admin_or_self};

const MIN_PASSWORD_LEN: usize = 8;

pub async fn list_professionals(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<Vec<Professional>> {
    require_admin(&identity)?;
    let list = professionals::list(&state.pool).await.map_err(internal)?;
    Ok(Json(list))
}

#[derive(Deserialize)]
pub struct ProfessionalCreateRequest {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo_url: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

pub async fn create_professional(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(req): Json<ProfessionalCreateRequest>,
) -> ApiResult<Professional> {
    require_admin(&identity)?;

    let name = req.name.trim();
    let email = req.email.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::required_field("name"));
    }
    if email.is_empty() {
        return Err(AppError::required_field("email"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    let hashed =
        hash_password(&req.password).map_err(|_| AppError::new(ErrorCode::InternalError))?;

    let professional = professionals::create(
        &state.pool,
        name,
        &req.role,
        &req.bio,
        &req.photo_url,
        &email,
        &hashed,
        req.is_admin,
        crate::util::now_millis(),
    )
    .await
    .map_err(|e| {
        if professionals::is_email_conflict(&e) {
            AppError::new(ErrorCode::ProfessionalEmailExists)
        } else {
            internal(e)
        }
    })?;

    Ok(Json(professional))
}

#[derive(Deserialize)]
pub struct ProfessionalUpdateRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub email: Option<String>,
    /// Re-hashed when present
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

/// PUT /api/admin/professionals/{id} — admin, or a professional editing
/// their own profile. Only admins may change the administrator flag.
pub async fn update_professional(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(req): Json<ProfessionalUpdateRequest>,
) -> ApiResult<Professional> {
    require_admin_or_self(&identity, id)?;
    if req.is_admin.is_some() && !identity.is_admin {
        return Err(AppError::new(ErrorCode::AdminRequired));
    }

    let hashed = match req.password.as_deref() {
        Some(p) if p.len() < MIN_PASSWORD_LEN => {
            return Err(AppError::new(ErrorCode::PasswordTooShort))
        }
        Some(p) => {
            Some(hash_password(p).map_err(|_| AppError::new(ErrorCode::InternalError))?)
        }
        None => None,
    };

    let email = req.email.as_deref().map(|e| e.trim().to_lowercase());

    let professional = professionals::update(
        &state.pool,
        id,
        req.name.as_deref(),
        req.role.as_deref(),
        req.bio.as_deref(),
        req.photo_url.as_deref(),
        email.as_deref(),
        hashed.as_deref(),
        req.is_admin,
    )
    .await
    .map_err(|e| {
        if professionals::is_email_conflict(&e) {
            AppError::new(ErrorCode::ProfessionalEmailExists)
        } else {
            internal(e)
        }
    })?
    .ok_or_else(|| AppError::new(ErrorCode::ProfessionalNotFound))?;

    Ok(Json(professional))
}

pub async fn delete_professional(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    require_admin(&identity)?;
    let deleted = professionals::delete(&state.pool, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::ProfessionalNotFound));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}
