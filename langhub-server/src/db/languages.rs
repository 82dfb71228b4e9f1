//! Language repository
//!
//! The state column is written only by `create` (initial state) and
//! `set_state`; content updates never touch it.

use shared::models::{Language, LanguageCreate, LanguageUpdate, ResourceState};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, author_id, created_at, state";

pub async fn create(
    pool: &SqlitePool,
    data: LanguageCreate,
    author_id: i64,
    state: ResourceState,
) -> AppResult<Language> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO language (name, description, author_id, created_at, state) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(author_id)
    .bind(super::now_ts())
    .bind(state)
    .fetch_one(pool)
    .await
    .map_err(|e| super::map_unique(e, "language", &["name"]))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("language vanished after insert"))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Language>> {
    let language = sqlx::query_as::<_, Language>(&format!(
        "SELECT {COLUMNS} FROM language WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(language)
}

pub async fn list(pool: &SqlitePool, state: Option<ResourceState>) -> AppResult<Vec<Language>> {
    let languages = match state {
        Some(state) => {
            sqlx::query_as::<_, Language>(&format!(
                "SELECT {COLUMNS} FROM language WHERE state = ? ORDER BY name"
            ))
            .bind(state)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Language>(&format!(
                "SELECT {COLUMNS} FROM language ORDER BY name"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(languages)
}

pub async fn update(pool: &SqlitePool, id: i64, data: LanguageUpdate) -> AppResult<Language> {
    sqlx::query(
        "UPDATE language SET name = COALESCE(?1, name), \
         description = COALESCE(?2, description) WHERE id = ?3",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| super::map_unique(e, "language", &["name"]))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("language"))
}

pub async fn set_state(pool: &SqlitePool, id: i64, state: ResourceState) -> AppResult<Language> {
    let rows = sqlx::query("UPDATE language SET state = ? WHERE id = ?")
        .bind(state)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::not_found("language"));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("language"))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let rows = sqlx::query("DELETE FROM language WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::not_found("language"));
    }
    Ok(())
}
