//! Professional (team member) database operations

use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Professional {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub photo_url: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_admin: bool,
    pub created_at: i64,
}

pub async fn list(pool: &PgPool) -> Result<Vec<Professional>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM professionals ORDER BY name, id")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Professional>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM professionals WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Professional>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM professionals WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    name: &str,
    role: &str,
    bio: &str,
    photo_url: &str,
    email: &str,
    hashed_password: &str,
    is_admin: bool,
    now: i64,
) -> Result<Professional, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO professionals (name, role, bio, photo_url, email, hashed_password, is_admin, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(role)
    .bind(bio)
    .bind(photo_url)
    .bind(email)
    .bind(hashed_password)
    .bind(is_admin)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Partial update; None fields keep their current value.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: i64,
    name: Option<&str>,
    role: Option<&str>,
    bio: Option<&str>,
    photo_url: Option<&str>,
    email: Option<&str>,
    hashed_password: Option<&str>,
    is_admin: Option<bool>,
) -> Result<Option<Professional>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE professionals SET
            name = COALESCE($1, name),
            role = COALESCE($2, role),
            bio = COALESCE($3, bio),
            photo_url = COALESCE($4, photo_url),
            email = COALESCE($5, email),
            hashed_password = COALESCE($6, hashed_password),
            is_admin = COALESCE($7, is_admin)
        WHERE id = $8
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(role)
    .bind(bio)
    .bind(photo_url)
    .bind(email)
    .bind(hashed_password)
    .bind(is_admin)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Deleting a professional cascades to availability, roster links and
/// appointments.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM professionals WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// True if a unique-violation on the professionals email column.
pub fn is_email_conflict(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|e| e.code().as_deref() == Some("23505"))
}
