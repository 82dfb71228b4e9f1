//! User repository

use shared::models::User;
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, name, username, email, password_hash, role_id, enabled, locked, image_id, created_at";

/// Insert payload. Borrowed fields because registration validates and
/// normalizes before insert without taking ownership.
pub struct NewUser<'a> {
    pub name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role_id: i64,
    pub image_id: Option<i64>,
}

pub async fn create(pool: &SqlitePool, data: NewUser<'_>) -> AppResult<User> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO user (name, username, email, password_hash, role_id, image_id, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.name)
    .bind(data.username)
    .bind(data.email)
    .bind(data.password_hash)
    .bind(data.role_id)
    .bind(data.image_id)
    .bind(super::now_ts())
    .fetch_one(pool)
    .await
    .map_err(|e| super::map_unique(e, "user", &["email", "username"]))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("user vanished after insert"))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Lookup by normalized (lowercased, trimmed) email.
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM user ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn set_enabled(pool: &SqlitePool, id: i64, enabled: bool) -> AppResult<()> {
    let rows = sqlx::query("UPDATE user SET enabled = ? WHERE id = ?")
        .bind(enabled)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::not_found("user"));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let rows = sqlx::query("DELETE FROM user WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::not_found("user"));
    }
    Ok(())
}
