//! Weekly availability template database operations

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// One weekday of a professional's recurring template.
/// At most one row per (professional, day_of_week); 0 = Sunday.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Availability {
    pub id: i64,
    pub professional_id: i64,
    pub day_of_week: i16,
    pub time_slots: Vec<String>,
    pub is_available: bool,
}

/// Incoming weekday row for a template upsert.
#[derive(Debug, Deserialize)]
pub struct DaySchedule {
    pub day_of_week: i16,
    pub time_slots: Vec<String>,
    pub is_available: bool,
}

pub async fn list_for_professional(
    pool: &PgPool,
    professional_id: i64,
) -> Result<Vec<Availability>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM availability WHERE professional_id = $1 ORDER BY day_of_week",
    )
    .bind(professional_id)
    .fetch_all(pool)
    .await
}

pub async fn find_for_day(
    pool: &PgPool,
    professional_id: i64,
    day_of_week: i16,
) -> Result<Option<Availability>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM availability WHERE professional_id = $1 AND day_of_week = $2")
        .bind(professional_id)
        .bind(day_of_week)
        .fetch_optional(pool)
        .await
}

/// Upsert the submitted weekday rows in one transaction, keyed on
/// (professional_id, day_of_week); either the whole week lands or none of
/// it. Slots are stored sorted ascending.
pub async fn replace_week(
    pool: &PgPool,
    professional_id: i64,
    days: &[DaySchedule],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for day in days {
        let mut slots = day.time_slots.clone();
        slots.sort();

        sqlx::query(
            r#"
            INSERT INTO availability (professional_id, day_of_week, time_slots, is_available)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (professional_id, day_of_week)
            DO UPDATE SET
                time_slots = EXCLUDED.time_slots,
                is_available = EXCLUDED.is_available
            "#,
        )
        .bind(professional_id)
        .bind(day.day_of_week)
        .bind(&slots)
        .bind(day.is_available)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
