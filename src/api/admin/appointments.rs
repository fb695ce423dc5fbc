//! Operator appointment dashboard

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::{internal, ApiResult};
use crate::auth::staff_auth::StaffIdentity;
use crate::db::appointments::{self, Appointment, AppointmentDetail};
use crate::error::{AppError, ErrorCode};
use crate::scheduling::{self, AppointmentStatus};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AppointmentListQuery {
    /// Restrict the listing to one calendar date, "YYYY-MM-DD".
    pub date: Option<String>,
}

/// GET /api/admin/appointments — admins see every professional's agenda,
/// other professionals only their own.
pub async fn list_appointments(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Query(query): Query<AppointmentListQuery>,
) -> ApiResult<Vec<AppointmentDetail>> {
    let window = match query.date.as_deref() {
        Some(s) => {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                AppError::with_message(ErrorCode::InvalidFormat, "date must be YYYY-MM-DD")
            })?;
            Some(scheduling::day_window(date))
        }
        None => None,
    };

    let professional_id = if identity.is_admin {
        None
    } else {
        Some(identity.professional_id)
    };

    let list = appointments::list_detailed(&state.pool, professional_id, window)
        .await
        .map_err(internal)?;
    Ok(Json(list))
}

#[derive(Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// POST /api/admin/appointments/{id}/status — move an appointment through
/// its lifecycle. Every transition is checked against the allowed table;
/// terminal states never move again.
pub async fn update_appointment_status(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(id): Path<i64>,
    Json(req): Json<StatusUpdateRequest>,
) -> ApiResult<Appointment> {
    let target = AppointmentStatus::from_db(&req.status)
        .ok_or_else(|| {
            AppError::new(ErrorCode::InvalidStatus).with_detail("status", req.status.clone())
        })?;

    let mut appointment = appointments::find_by_id(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::AppointmentNotFound))?;

    if !identity.is_admin && appointment.professional_id != identity.professional_id {
        return Err(AppError::new(ErrorCode::PermissionDenied));
    }

    let current = AppointmentStatus::from_db(&appointment.status)
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;
    if !current.can_transition_to(target) {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("from", current.as_str())
            .with_detail("to", target.as_str()));
    }

    appointments::update_status(&state.pool, id, target.as_str())
        .await
        .map_err(internal)?;
    appointment.status = target.as_str().to_string();

    Ok(Json(appointment))
}
