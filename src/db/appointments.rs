//! Appointment database operations
//!
//! Status filters everywhere exclude 'cancelled' and 'rejected': terminal
//! appointments never block a slot.

use serde::Serialize;
use sqlx::PgPool;

use crate::scheduling::BusyInterval;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: i64,
    pub created_at: i64,
    pub service_id: i64,
    pub professional_id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub start_time: i64,
    pub end_time: i64,
    pub status: String,
}

/// Appointment row joined with service and professional names, for the
/// operator dashboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AppointmentDetail {
    pub id: i64,
    pub created_at: i64,
    pub service_id: i64,
    pub service_name: String,
    pub professional_id: i64,
    pub professional_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub start_time: i64,
    pub end_time: i64,
    pub status: String,
}

/// Committed intervals for a professional whose start falls inside
/// `[window_start, window_end]`.
pub async fn busy_intervals(
    pool: &PgPool,
    professional_id: i64,
    window_start: i64,
    window_end: i64,
) -> Result<Vec<BusyInterval>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT start_time, end_time FROM appointments
        WHERE professional_id = $1
          AND status NOT IN ('cancelled', 'rejected')
          AND start_time >= $2
          AND start_time <= $3
        ORDER BY start_time
        "#,
    )
    .bind(professional_id)
    .bind(window_start)
    .bind(window_end)
    .fetch_all(pool)
    .await
}

/// Ids of live appointments overlapping `[candidate_start, candidate_end)`.
/// Non-empty means the candidate slot is busy.
pub async fn conflicting_ids(
    pool: &PgPool,
    professional_id: i64,
    candidate_start: i64,
    candidate_end: i64,
) -> Result<Vec<i64>, sqlx::Error> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        r#"
        SELECT id FROM appointments
        WHERE professional_id = $1
          AND status NOT IN ('cancelled', 'rejected')
          AND start_time < $3
          AND end_time > $2
        "#,
    )
    .bind(professional_id)
    .bind(candidate_start)
    .bind(candidate_end)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    service_id: i64,
    professional_id: i64,
    customer_name: &str,
    customer_phone: &str,
    start_time: i64,
    end_time: i64,
    status: &str,
    now: i64,
) -> Result<Appointment, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO appointments (
            created_at, service_id, professional_id,
            customer_name, customer_phone, start_time, end_time, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(now)
    .bind(service_id)
    .bind(professional_id)
    .bind(customer_name)
    .bind(customer_phone)
    .bind(start_time)
    .bind(end_time)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Appointment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM appointments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Single-field status update keyed by id.
pub async fn update_status(pool: &PgPool, id: i64, status: &str) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("UPDATE appointments SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Dashboard listing. `professional_id = None` lists all professionals
/// (admin view); the optional window filters on start_time.
pub async fn list_detailed(
    pool: &PgPool,
    professional_id: Option<i64>,
    window: Option<(i64, i64)>,
) -> Result<Vec<AppointmentDetail>, sqlx::Error> {
    let (window_start, window_end) = match window {
        Some((s, e)) => (Some(s), Some(e)),
        None => (None, None),
    };

    sqlx::query_as(
        r#"
        SELECT a.id, a.created_at,
               a.service_id, s.name AS service_name,
               a.professional_id, p.name AS professional_name,
               a.customer_name, a.customer_phone,
               a.start_time, a.end_time, a.status
        FROM appointments a
        JOIN services s ON s.id = a.service_id
        JOIN professionals p ON p.id = a.professional_id
        WHERE ($1::bigint IS NULL OR a.professional_id = $1)
          AND ($2::bigint IS NULL OR a.start_time >= $2)
          AND ($3::bigint IS NULL OR a.start_time <= $3)
        ORDER BY a.start_time DESC
        "#,
    )
    .bind(professional_id)
    .bind(window_start)
    .bind(window_end)
    .fetch_all(pool)
    .await
}

/// True if the insert tripped the `appointments_no_overlap` exclusion
/// constraint (SQLSTATE 23P01): another booking won the race.
pub fn is_overlap_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|e| e.code().as_deref() == Some("23P01"))
}
