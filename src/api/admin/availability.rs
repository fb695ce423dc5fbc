//! Weekly availability template management

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveTime;
use serde::Deserialize;

use crate::api::{internal, ApiResult};
use crate::auth::staff_auth::StaffIdentity;
use crate::db::availability::{self, Availability, DaySchedule};
use crate::db::professionals;
use crate::error::{AppError, ErrorCode};
use crate::state::AppState;

use super::require_admin_or_self;

pub async fn get_availability(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(professional_id): Path<i64>,
) -> ApiResult<Vec<Availability>> {
    require_admin_or_self(&identity, professional_id)?;

    professionals::find_by_id(&state.pool, professional_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProfessionalNotFound))?;

    let week = availability::list_for_professional(&state.pool, professional_id)
        .await
        .map_err(internal)?;
    Ok(Json(week))
}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub days: Vec<DaySchedule>,
}

/// PUT /api/admin/professionals/{id}/availability — upsert the submitted
/// weekday rows. Days not included keep their stored template.
pub async fn put_availability(
    State(state): State<AppState>,
    Extension(identity): Extension<StaffIdentity>,
    Path(professional_id): Path<i64>,
    Json(req): Json<AvailabilityRequest>,
) -> ApiResult<Vec<Availability>> {
    require_admin_or_self(&identity, professional_id)?;

    professionals::find_by_id(&state.pool, professional_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProfessionalNotFound))?;

    validate_week(&req.days)?;
    availability::replace_week(&state.pool, professional_id, &req.days)
        .await
        .map_err(internal)?;

    let week = availability::list_for_professional(&state.pool, professional_id)
        .await
        .map_err(internal)?;
    Ok(Json(week))
}

/// Validate the whole submission before touching storage; a bad row anywhere
/// rejects the request without a partial write.
fn validate_week(days: &[DaySchedule]) -> Result<(), AppError> {
    for day in days {
        validate_day(day)?;
    }
    Ok(())
}

fn validate_day(day: &DaySchedule) -> Result<(), AppError> {
    if !(0..=6).contains(&day.day_of_week) {
        return Err(AppError::new(ErrorCode::InvalidDayOfWeek)
            .with_detail("day_of_week", day.day_of_week));
    }
    for slot in &day.time_slots {
        if NaiveTime::parse_from_str(slot, "%H:%M").is_err() {
            return Err(
                AppError::new(ErrorCode::InvalidTimeSlot).with_detail("slot", slot.clone())
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day_of_week: i16, slots: &[&str]) -> DaySchedule {
        DaySchedule {
            day_of_week,
            time_slots: slots.iter().map(|s| s.to_string()).collect(),
            is_available: true,
        }
    }

    #[test]
    fn accepts_well_formed_day() {
        assert!(validate_day(&day(1, &["09:00", "14:30"])).is_ok());
    }

    #[test]
    fn rejects_out_of_range_weekday() {
        let err = validate_day(&day(7, &["09:00"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDayOfWeek);
        let err = validate_day(&day(-1, &[])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDayOfWeek);
    }

    #[test]
    fn rejects_malformed_slot() {
        let err = validate_day(&day(2, &["9am"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTimeSlot);
        let err = validate_day(&day(2, &["25:00"])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTimeSlot);
    }

    #[test]
    fn bad_row_rejects_whole_week() {
        // A malformed later day must fail the submission up front; nothing is
        // written until the full week validates.
        let week = vec![day(1, &["09:00"]), day(2, &["10:00"]), day(9, &["11:00"])];
        let err = validate_week(&week).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDayOfWeek);
        assert!(validate_week(&week[..2]).is_ok());
    }
}
