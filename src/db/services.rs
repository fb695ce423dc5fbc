//! Service catalog database operations

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::professionals::Professional;
use super::BoxError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub duration_minutes: i32,
    pub price: Decimal,
    pub pix_key: String,
    pub pix_qr_url: Option<String>,
    pub image_url: String,
    pub category: String,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: i32,
    pub price: Decimal,
    #[serde(default)]
    pub pix_key: String,
    pub pix_qr_url: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub pix_key: Option<String>,
    pub pix_qr_url: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

pub async fn list(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM services ORDER BY created_at, id")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Service>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Insert a service together with its initial roster in one transaction, so
/// a bad professional id rolls the service row back too.
pub async fn create(
    pool: &PgPool,
    data: &ServiceCreate,
    professional_ids: &[i64],
    now: i64,
) -> Result<Service, BoxError> {
    let mut tx = pool.begin().await?;

    let service: Service = sqlx::query_as(
        r#"
        INSERT INTO services (
            name, description, duration_minutes, price,
            pix_key, pix_qr_url, image_url, category, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.duration_minutes)
    .bind(data.price)
    .bind(&data.pix_key)
    .bind(&data.pix_qr_url)
    .bind(&data.image_url)
    .bind(&data.category)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    if !professional_ids.is_empty() {
        let service_ids: Vec<i64> = professional_ids.iter().map(|_| service.id).collect();
        sqlx::query(
            "INSERT INTO service_professionals (service_id, professional_id)
             SELECT * FROM UNNEST($1::bigint[], $2::bigint[])",
        )
        .bind(&service_ids)
        .bind(professional_ids)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(service)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &ServiceUpdate,
) -> Result<Option<Service>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE services SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            duration_minutes = COALESCE($3, duration_minutes),
            price = COALESCE($4, price),
            pix_key = COALESCE($5, pix_key),
            pix_qr_url = COALESCE($6, pix_qr_url),
            image_url = COALESCE($7, image_url),
            category = COALESCE($8, category)
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.duration_minutes)
    .bind(data.price)
    .bind(&data.pix_key)
    .bind(&data.pix_qr_url)
    .bind(&data.image_url)
    .bind(&data.category)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Deleting a service cascades to roster links and appointments.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// ── Roster (service <-> professional links) ──

/// Replace the full professional roster of a service: delete-then-reinsert
/// in one transaction.
pub async fn replace_roster(
    pool: &PgPool,
    service_id: i64,
    professional_ids: &[i64],
) -> Result<(), BoxError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM service_professionals WHERE service_id = $1")
        .bind(service_id)
        .execute(&mut *tx)
        .await?;

    if !professional_ids.is_empty() {
        let service_ids: Vec<i64> = professional_ids.iter().map(|_| service_id).collect();
        sqlx::query(
            "INSERT INTO service_professionals (service_id, professional_id)
             SELECT * FROM UNNEST($1::bigint[], $2::bigint[])",
        )
        .bind(&service_ids)
        .bind(professional_ids)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn roster(pool: &PgPool, service_id: i64) -> Result<Vec<Professional>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT p.* FROM professionals p
        JOIN service_professionals sp ON sp.professional_id = p.id
        WHERE sp.service_id = $1
        ORDER BY p.name, p.id
        "#,
    )
    .bind(service_id)
    .fetch_all(pool)
    .await
}

pub async fn is_assigned(
    pool: &PgPool,
    service_id: i64,
    professional_id: i64,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i32,)> = sqlx::query_as(
        "SELECT 1 FROM service_professionals WHERE service_id = $1 AND professional_id = $2",
    )
    .bind(service_id)
    .bind(professional_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

/// Services a given professional is assigned to (non-admin catalog view).
pub async fn list_for_professional(
    pool: &PgPool,
    professional_id: i64,
) -> Result<Vec<Service>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT s.* FROM services s
        JOIN service_professionals sp ON sp.service_id = s.id
        WHERE sp.professional_id = $1
        ORDER BY s.created_at, s.id
        "#,
    )
    .bind(professional_id)
    .fetch_all(pool)
    .await
}
