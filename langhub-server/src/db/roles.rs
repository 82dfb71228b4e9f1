//! Role repository
//!
//! Enforces the default-role invariants at the storage boundary: exactly one
//! role is the default at all times, and a role that users still reference
//! cannot be removed.

use shared::permissions::{ALL_PERMISSIONS, DEFAULT_MEMBER_PERMISSIONS};
use shared::{AppError, AppResult};
use shared::models::{Role, RoleCreate, RoleUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, is_default, permissions";

/// There is exactly one default role and it never moves: a second default is
/// rejected and the current one cannot be demoted.
const DEFAULT_ROLE_FIXED: &str =
    "the default role assignment cannot be changed; exactly one role stays default";

pub async fn find_all(pool: &SqlitePool) -> AppResult<Vec<Role>> {
    let roles = sqlx::query_as::<_, Role>(&format!(
        "SELECT {COLUMNS} FROM role ORDER BY title"
    ))
    .fetch_all(pool)
    .await?;
    Ok(roles)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>(&format!(
        "SELECT {COLUMNS} FROM role WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(role)
}

pub async fn find_by_title(pool: &SqlitePool, title: &str) -> AppResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>(&format!(
        "SELECT {COLUMNS} FROM role WHERE title = ? LIMIT 1"
    ))
    .bind(title)
    .fetch_optional(pool)
    .await?;
    Ok(role)
}

/// The role assigned to self-registered users.
pub async fn find_default(pool: &SqlitePool) -> AppResult<Option<Role>> {
    let role = sqlx::query_as::<_, Role>(&format!(
        "SELECT {COLUMNS} FROM role WHERE is_default = 1 LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;
    Ok(role)
}

pub async fn create(pool: &SqlitePool, data: RoleCreate) -> AppResult<Role> {
    if data.is_default && find_default(pool).await?.is_some() {
        return Err(AppError::business_rule(DEFAULT_ROLE_FIXED));
    }

    let permissions_json = serde_json::to_string(&data.permissions)
        .map_err(|e| AppError::internal(format!("permissions serialization: {e}")))?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO role (title, is_default, permissions) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(&data.title)
    .bind(data.is_default)
    .bind(permissions_json)
    .fetch_one(pool)
    .await
    .map_err(|e| super::map_unique(e, "role", &["title"]))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("role vanished after insert"))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RoleUpdate) -> AppResult<Role> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("role"))?;

    match data.is_default {
        Some(false) if existing.is_default => {
            return Err(AppError::business_rule(DEFAULT_ROLE_FIXED));
        }
        Some(true) if !existing.is_default => {
            if find_default(pool).await?.is_some() {
                return Err(AppError::business_rule(DEFAULT_ROLE_FIXED));
            }
        }
        _ => {}
    }

    let permissions_json = data
        .permissions
        .as_ref()
        .map(|p| serde_json::to_string(p))
        .transpose()
        .map_err(|e| AppError::internal(format!("permissions serialization: {e}")))?;

    sqlx::query(
        "UPDATE role SET title = COALESCE(?1, title), is_default = COALESCE(?2, is_default), \
         permissions = COALESCE(?3, permissions) WHERE id = ?4",
    )
    .bind(&data.title)
    .bind(data.is_default)
    .bind(permissions_json)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| super::map_unique(e, "role", &["title"]))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("role"))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("role"))?;

    if existing.is_default {
        return Err(AppError::business_rule("cannot delete the default role"));
    }
    if count_users(pool, id).await? > 0 {
        return Err(AppError::business_rule(
            "role is still assigned to users",
        ));
    }

    sqlx::query("DELETE FROM role WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// How many users currently hold this role.
pub async fn count_users(pool: &SqlitePool, role_id: i64) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user WHERE role_id = ?")
        .bind(role_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Seed the role table on first boot: a full-permission admin role and the
/// default member role. A non-empty table is left untouched.
pub async fn ensure_seed(pool: &SqlitePool) -> AppResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM role")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    create(
        pool,
        RoleCreate {
            title: "admin".into(),
            is_default: false,
            permissions: ALL_PERMISSIONS.to_vec(),
        },
    )
    .await?;
    create(
        pool,
        RoleCreate {
            title: "member".into(),
            is_default: true,
            permissions: DEFAULT_MEMBER_PERMISSIONS.to_vec(),
        },
    )
    .await?;

    tracing::info!("seeded admin and default member roles");
    Ok(())
}
