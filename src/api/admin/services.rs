//! Service catalog management

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::{internal, ApiResult};
use crate::auth::staff_auth::StaffIdentity;
use crate::db::professionals::Professional;
use crate::db::services::{self, Service, ServiceCreate, ServiceUpdate};
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;

use super::require_admin;

/// GET /api/admin/services — admins see the whole catalog, other
/// professionals only the services they are assigned to.
pub async fn list_services(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
) -> ApiResult<Vec<Service>> {
    let list = if identity.is_admin {
        services::list(&state.pool).await
    } else {
        services::list_for_professional(&state.pool, identity.professional_id).await
    }
    .map_err(internal)?;
    Ok(Json(list))
}

#[derive(Deserialize)]
pub struct ServiceCreateRequest {
    #[serde(flatten)]
    pub service: ServiceCreate,
    /// Full roster to assign; omitted means no professionals yet.
    pub professional_ids: Option<Vec<i64>>,
}

pub async fn create_service(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Json(req): Json<ServiceCreateRequest>,
) -> ApiResult<Service> {
    require_admin(&identity)?;
    if req.service.name.trim().is_empty() {
        return Err(AppError::required_field("name"));
    }
    validate_pricing(Some(req.service.duration_minutes), Some(req.service.price))?;

    let roster = req.professional_ids.as_deref().unwrap_or(&[]);
    let service = services::create(&state.pool, &req.service, roster, crate::util::now_millis())
        .await
        .map_err(roster_error)?;

    Ok(Json(service))
}

#[derive(Deserialize)]
pub struct ServiceUpdateRequest {
    #[serde(flatten)]
    pub service: ServiceUpdate,
    /// When present, fully replaces the assigned roster.
    pub professional_ids: Option<Vec<i64>>,
}

pub async fn update_service(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(req): Json<ServiceUpdateRequest>,
) -> ApiResult<Service> {
    require_admin(&identity)?;
    validate_pricing(req.service.duration_minutes, req.service.price)?;

    let service = services::update(&state.pool, id, &req.service)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotFound))?;

    if let Some(ref ids) = req.professional_ids {
        services::replace_roster(&state.pool, id, ids)
            .await
            .map_err(roster_error)?;
    }

    Ok(Json(service))
}

pub async fn delete_service(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    require_admin(&identity)?;
    let deleted = services::delete(&state.pool, id).await.map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::ServiceNotFound));
    }
    Ok(Json(serde_json::json!({ "deleted": id })))
}

pub async fn service_roster(
    State(state): State<AppState>,
    Extension(_identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<Professional>> {
    services::find_by_id(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotFound))?;
    let roster = services::roster(&state.pool, id).await.map_err(internal)?;
    Ok(Json(roster))
}

#[derive(Deserialize)]
pub struct RosterRequest {
    pub professional_ids: Vec<i64>,
}

/// PUT /api/admin/services/{id}/professionals — replace-all roster edit.
pub async fn set_service_roster(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(req): Json<RosterRequest>,
) -> ApiResult<Vec<Professional>> {
    require_admin(&identity)?;
    services::find_by_id(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotFound))?;

    services::replace_roster(&state.pool, id, &req.professional_ids)
        .await
        .map_err(roster_error)?;

    let roster = services::roster(&state.pool, id).await.map_err(internal)?;
    Ok(Json(roster))
}

fn validate_pricing(duration_minutes: Option<i32>, price: Option<Decimal>) -> Result<(), AppError> {
    if duration_minutes.is_some_and(|d| d <= 0) {
        return Err(AppError::new(ErrorCode::ServiceInvalidDuration));
    }
    if price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::new(ErrorCode::ServiceInvalidPrice));
    }
    Ok(())
}

/// Roster inserts can trip the professional FK (23503) when an unknown id is
/// submitted; everything else is an internal error.
fn roster_error(e: crate::db::BoxError) -> AppError {
    if let Some(db_err) = e.downcast_ref::<sqlx::Error>() {
        if db_err
            .as_database_error()
            .is_some_and(|d| d.code().as_deref() == Some("23503"))
        {
            return AppError::new(ErrorCode::ProfessionalNotFound);
        }
    }
    internal(e)
}
