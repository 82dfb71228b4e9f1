//! User administration handlers. All of them require `users:manage`.

use axum::extract::{Path, State};
use axum::{Json, Router};
use serde::Deserialize;
use shared::models::{User, UserInfo};
use shared::{ApiResponse, AppError, AppResult, Permission};

use crate::auth::Principal;
use crate::core::AppState;
use crate::db;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", axum::routing::get(list))
        .route(
            "/api/users/{id}",
            axum::routing::get(get).delete(delete),
        )
        .route("/api/users/{id}/enabled", axum::routing::patch(set_enabled))
}

pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<ApiResponse<Vec<UserInfo>>>> {
    principal.require(Permission::UsersManage)?;

    let users = db::users::list(&state.pool).await?;
    let mut infos = Vec::with_capacity(users.len());
    for user in users {
        infos.push(resolve_info(&state, user).await?);
    }
    Ok(Json(ApiResponse::ok(infos)))
}

pub async fn get(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    principal.require(Permission::UsersManage)?;
    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;
    Ok(Json(ApiResponse::ok(resolve_info(&state, user).await?)))
}

#[derive(Debug, Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

/// PATCH /api/users/{id}/enabled
///
/// Disabling takes effect on the account's next token use, not retroactively
/// on tokens already minted.
pub async fn set_enabled(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<SetEnabledRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.require(Permission::UsersManage)?;
    db::users::set_enabled(&state.pool, id, req.enabled).await?;
    tracing::info!(user_id = id, enabled = req.enabled, "user enabled flag changed");
    Ok(Json(ApiResponse::ok(())))
}

pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.require(Permission::UsersManage)?;
    db::users::delete(&state.pool, id).await?;
    tracing::info!(user_id = id, "user deleted");
    Ok(Json(ApiResponse::ok(())))
}

async fn resolve_info(state: &AppState, user: User) -> AppResult<UserInfo> {
    let role = db::roles::find_by_id(&state.pool, user.role_id)
        .await?
        .ok_or_else(|| AppError::not_found("role"))?;
    let image = match user.image_id {
        Some(image_id) => db::images::find_by_id(&state.pool, image_id).await?,
        None => None,
    };
    Ok(UserInfo::from_parts(user, role, image))
}
