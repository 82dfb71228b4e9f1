//! Image reference repository

use shared::AppResult;
use shared::models::ImageRef;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<ImageRef>> {
    let image = sqlx::query_as::<_, ImageRef>("SELECT id, path FROM image_ref WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(image)
}

pub async fn create(pool: &SqlitePool, path: &str) -> AppResult<ImageRef> {
    let id: i64 = sqlx::query_scalar("INSERT INTO image_ref (path) VALUES (?) RETURNING id")
        .bind(path)
        .fetch_one(pool)
        .await?;
    Ok(ImageRef { id, path: path.to_string() })
}
