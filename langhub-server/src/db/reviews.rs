//! Review repository

use shared::models::{ResourceState, Review, ReviewCreate, ReviewUpdate};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, body, language_id, author_id, created_at, state";

pub async fn create(
    pool: &SqlitePool,
    data: ReviewCreate,
    author_id: i64,
    state: ResourceState,
) -> AppResult<Review> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO review (title, body, language_id, author_id, created_at, state) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.title)
    .bind(&data.body)
    .bind(data.language_id)
    .bind(author_id)
    .bind(super::now_ts())
    .bind(state)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("review vanished after insert"))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(&format!(
        "SELECT {COLUMNS} FROM review WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(review)
}

pub async fn list(pool: &SqlitePool, state: Option<ResourceState>) -> AppResult<Vec<Review>> {
    let reviews = match state {
        Some(state) => {
            sqlx::query_as::<_, Review>(&format!(
                "SELECT {COLUMNS} FROM review WHERE state = ? ORDER BY created_at DESC"
            ))
            .bind(state)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Review>(&format!(
                "SELECT {COLUMNS} FROM review ORDER BY created_at DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(reviews)
}

pub async fn update(pool: &SqlitePool, id: i64, data: ReviewUpdate) -> AppResult<Review> {
    sqlx::query(
        "UPDATE review SET title = COALESCE(?1, title), body = COALESCE(?2, body) WHERE id = ?3",
    )
    .bind(&data.title)
    .bind(&data.body)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("review"))
}

pub async fn set_state(pool: &SqlitePool, id: i64, state: ResourceState) -> AppResult<Review> {
    let rows = sqlx::query("UPDATE review SET state = ? WHERE id = ?")
        .bind(state)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::not_found("review"));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("review"))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let rows = sqlx::query("DELETE FROM review WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::not_found("review"));
    }
    Ok(())
}
