//! Customer-facing booking flow endpoints
//!
//! Booking sequence: pick a service, pick a professional from its roster,
//! pick a date and a computed free slot, leave contact details, pay the Pix
//! deposit. The appointment is created as `waiting_payment` and moves to
//! `pending` when the customer reports the transfer.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::{appointments, availability, professionals, services};
use crate::error::{AppError, ErrorCode};
use crate::scheduling::{self, AppointmentStatus};
use crate::state::AppState;

use super::{internal, ApiResult};

pub async fn list_services(State(state): State<AppState>) -> ApiResult<Vec<services::Service>> {
    let list = services::list(&state.pool).await.map_err(internal)?;
    Ok(Json(list))
}

pub async fn list_professionals(
    State(state): State<AppState>,
    Path(service_id): Path<i64>,
) -> ApiResult<Vec<professionals::Professional>> {
    services::find_by_id(&state.pool, service_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotFound))?;

    let roster = services::roster(&state.pool, service_id)
        .await
        .map_err(internal)?;
    Ok(Json(roster))
}

pub async fn weekly_availability(
    State(state): State<AppState>,
    Path(professional_id): Path<i64>,
) -> ApiResult<Vec<availability::Availability>> {
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
pub struct SlotsQuery {
    pub service_id: i64,
    /// Calendar date, "YYYY-MM-DD"
    pub date: String,
}

/// GET /api/professionals/{id}/slots — run the availability resolver for one
/// (professional, service, date).
pub async fn available_slots(
    State(state): State<AppState>,
    Path(professional_id): Path<i64>,
    Query(query): Query<SlotsQuery>,
) -> ApiResult<Vec<String>> {
    let date = parse_date(&query.date)?;

    let service = services::find_by_id(&state.pool, query.service_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotFound))?;

    professionals::find_by_id(&state.pool, professional_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProfessionalNotFound))?;

    let day_of_week = date.weekday().num_days_from_sunday() as i16;
    let template = availability::find_for_day(&state.pool, professional_id, day_of_week)
        .await
        .map_err(internal)?;

    let (window_start, window_end) = scheduling::day_window(date);
    let busy = appointments::busy_intervals(&state.pool, professional_id, window_start, window_end)
        .await
        .map_err(internal)?;

    let slots = scheduling::compute_slots(
        template.as_ref(),
        &busy,
        date,
        service.duration_minutes,
    );
    Ok(Json(slots))
}

#[derive(Deserialize)]
pub struct BookingRequest {
    pub service_id: i64,
    pub professional_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    /// Calendar date, "YYYY-MM-DD"
    pub date: String,
    /// Slot start, "HH:MM"
    pub time: String,
}

/// Pix payment details echoed back to the customer. The deposit is half the
/// service price, the remainder is settled in person.
#[derive(Serialize)]
pub struct PaymentDetails {
    pub pix_key: String,
    pub pix_qr_url: Option<String>,
    pub total: Decimal,
    pub deposit: Decimal,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub appointment: appointments::Appointment,
    pub payment: PaymentDetails,
}

/// POST /api/appointments — validate, conflict-check, insert.
///
/// The conflict check closes most of the race window between slot display and
/// submission; the storage-level exclusion constraint closes the rest, and a
/// violation there is reported as the same slot-taken error.
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> ApiResult<BookingResponse> {
    let customer_name = req.customer_name.trim();
    let customer_phone = req.customer_phone.trim();
    if customer_name.is_empty() {
        return Err(AppError::required_field("customer_name"));
    }
    if customer_phone.is_empty() {
        return Err(AppError::required_field("customer_phone"));
    }

    let date = parse_date(&req.date)?;
    if NaiveTime::parse_from_str(&req.time, "%H:%M").is_err() {
        return Err(AppError::new(ErrorCode::InvalidTimeSlot));
    }

    let service = services::find_by_id(&state.pool, req.service_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotFound))?;

    professionals::find_by_id(&state.pool, req.professional_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::ProfessionalNotFound))?;

    if !services::is_assigned(&state.pool, req.service_id, req.professional_id)
        .await
        .map_err(internal)?
    {
        return Err(AppError::new(ErrorCode::ProfessionalNotAssigned));
    }

    // The requested time must come from the weekly template.
    let day_of_week = date.weekday().num_days_from_sunday() as i16;
    let template = availability::find_for_day(&state.pool, req.professional_id, day_of_week)
        .await
        .map_err(internal)?;
    let offered = template
        .as_ref()
        .is_some_and(|t| t.is_available && t.time_slots.iter().any(|s| s == &req.time));
    if !offered {
        return Err(AppError::with_message(
            ErrorCode::InvalidRequest,
            "Requested time is not offered on this day",
        ));
    }

    let (start_time, end_time) =
        scheduling::slot_interval(date, &req.time, service.duration_minutes)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidTimeSlot))?;

    // Conflict re-check immediately before insert.
    let conflicts =
        appointments::conflicting_ids(&state.pool, req.professional_id, start_time, end_time)
            .await
            .map_err(internal)?;
    if !conflicts.is_empty() {
        return Err(AppError::new(ErrorCode::SlotUnavailable));
    }

    let appointment = appointments::create(
        &state.pool,
        req.service_id,
        req.professional_id,
        customer_name,
        customer_phone,
        start_time,
        end_time,
        AppointmentStatus::WaitingPayment.as_str(),
        crate::util::now_millis(),
    )
    .await
    .map_err(|e| {
        if appointments::is_overlap_violation(&e) {
            AppError::new(ErrorCode::SlotUnavailable)
        } else {
            internal(e)
        }
    })?;

    let deposit = (service.price / Decimal::TWO).round_dp(2);
    Ok(Json(BookingResponse {
        appointment,
        payment: PaymentDetails {
            pix_key: service.pix_key,
            pix_qr_url: service.pix_qr_url,
            total: service.price,
            deposit,
        },
    }))
}

/// POST /api/appointments/{id}/confirm-payment — customer self-report.
/// Moves `waiting_payment` to `pending` for operator verification.
pub async fn confirm_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<appointments::Appointment> {
    let mut appointment = appointments::find_by_id(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::AppointmentNotFound))?;

    let current = AppointmentStatus::from_db(&appointment.status)
        .ok_or_else(|| AppError::new(ErrorCode::InternalError))?;
    if !current.can_transition_to(AppointmentStatus::Pending) {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("from", current.as_str())
            .with_detail("to", AppointmentStatus::Pending.as_str()));
    }

    appointments::update_status(&state.pool, id, AppointmentStatus::Pending.as_str())
        .await
        .map_err(internal)?;
    appointment.status = AppointmentStatus::Pending.as_str().to_string();

    Ok(Json(appointment))
}

fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, "date must be YYYY-MM-DD")
    })
}
