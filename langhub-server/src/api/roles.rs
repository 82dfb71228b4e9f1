//! Role administration handlers. All of them require `roles:manage`.

use axum::extract::{Path, State};
use axum::{Json, Router};
use shared::models::{Role, RoleCreate, RoleUpdate};
use shared::{ApiResponse, AppError, AppResult, Permission};

use crate::auth::Principal;
use crate::core::AppState;
use crate::db;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/roles", axum::routing::get(list).post(create))
        .route(
            "/api/roles/{id}",
            axum::routing::get(get).put(update).delete(delete),
        )
}

pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<ApiResponse<Vec<Role>>>> {
    principal.require(Permission::RolesManage)?;
    let roles = db::roles::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::ok(roles)))
}

pub async fn get(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Role>>> {
    principal.require(Permission::RolesManage)?;
    let role = db::roles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("role"))?;
    Ok(Json(ApiResponse::ok(role)))
}

pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<RoleCreate>,
) -> AppResult<Json<ApiResponse<Role>>> {
    principal.require(Permission::RolesManage)?;
    validate_required_text("title", &req.title, MAX_NAME_LEN)?;

    let role = db::roles::create(&state.pool, req).await?;
    tracing::info!(role_id = role.id, title = %role.title, "role created");
    Ok(Json(ApiResponse::ok(role)))
}

pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<RoleUpdate>,
) -> AppResult<Json<ApiResponse<Role>>> {
    principal.require(Permission::RolesManage)?;
    validate_optional_text("title", req.title.as_deref(), MAX_NAME_LEN)?;

    let role = db::roles::update(&state.pool, id, req).await?;
    tracing::info!(role_id = role.id, "role updated");
    Ok(Json(ApiResponse::ok(role)))
}

pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.require(Permission::RolesManage)?;
    db::roles::delete(&state.pool, id).await?;
    tracing::info!(role_id = id, "role deleted");
    Ok(Json(ApiResponse::ok(())))
}
