//! Framework repository

use shared::models::{Framework, FrameworkCreate, FrameworkUpdate, ResourceState};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, language_id, author_id, created_at, state";

pub async fn create(
    pool: &SqlitePool,
    data: FrameworkCreate,
    author_id: i64,
    state: ResourceState,
) -> AppResult<Framework> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO framework (name, description, language_id, author_id, created_at, state) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.language_id)
    .bind(author_id)
    .bind(super::now_ts())
    .bind(state)
    .fetch_one(pool)
    .await
    .map_err(|e| super::map_unique(e, "framework", &["name"]))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("framework vanished after insert"))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Framework>> {
    let framework = sqlx::query_as::<_, Framework>(&format!(
        "SELECT {COLUMNS} FROM framework WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(framework)
}

pub async fn list(pool: &SqlitePool, state: Option<ResourceState>) -> AppResult<Vec<Framework>> {
    let frameworks = match state {
        Some(state) => {
            sqlx::query_as::<_, Framework>(&format!(
                "SELECT {COLUMNS} FROM framework WHERE state = ? ORDER BY name"
            ))
            .bind(state)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Framework>(&format!(
                "SELECT {COLUMNS} FROM framework ORDER BY name"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(frameworks)
}

pub async fn update(pool: &SqlitePool, id: i64, data: FrameworkUpdate) -> AppResult<Framework> {
    sqlx::query(
        "UPDATE framework SET name = COALESCE(?1, name), \
         description = COALESCE(?2, description) WHERE id = ?3",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| super::map_unique(e, "framework", &["name"]))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("framework"))
}

pub async fn set_state(pool: &SqlitePool, id: i64, state: ResourceState) -> AppResult<Framework> {
    let rows = sqlx::query("UPDATE framework SET state = ? WHERE id = ?")
        .bind(state)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::not_found("framework"));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("framework"))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let rows = sqlx::query("DELETE FROM framework WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(AppError::not_found("framework"));
    }
    Ok(())
}
