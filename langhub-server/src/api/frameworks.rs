//! Framework catalog handlers.
//!
//! Same moderation gating as languages; a framework additionally references
//! the language it belongs to, which must exist at creation time.

use axum::extract::{Path, Query, State};
use axum::{Json, Router};
use shared::client::{ListQuery, SetStateRequest};
use shared::models::{Framework, FrameworkCreate, FrameworkUpdate};
use shared::{ApiResponse, AppError, AppResult, Permission};

use crate::auth::{MaybePrincipal, Principal, has_permission_or_is_author};
use crate::core::AppState;
use crate::db;
use crate::moderation::{
    authorize_set_state, authorize_view, effective_state_filter, initial_state,
};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEXT_LEN, validate_optional_text, validate_required_text,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/frameworks", axum::routing::get(list).post(create))
        .route(
            "/api/frameworks/{id}",
            axum::routing::get(get).put(update).delete(delete),
        )
        .route(
            "/api/frameworks/{id}/state",
            axum::routing::patch(set_state),
        )
}

pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<FrameworkCreate>,
) -> AppResult<Json<ApiResponse<Framework>>> {
    principal.require(Permission::FrameworkCreate)?;
    validate_required_text("name", &req.name, MAX_NAME_LEN)?;
    validate_optional_text("description", req.description.as_deref(), MAX_TEXT_LEN)?;

    db::languages::find_by_id(&state.pool, req.language_id)
        .await?
        .ok_or_else(|| AppError::not_found("language"))?;

    let state_for_new = initial_state(&principal, Permission::FrameworkSetState);
    let framework = db::frameworks::create(&state.pool, req, principal.id, state_for_new).await?;

    tracing::info!(
        framework_id = framework.id,
        state = ?framework.moderation.state,
        "framework created"
    );
    Ok(Json(ApiResponse::ok(framework)))
}

pub async fn get(
    State(state): State<AppState>,
    MaybePrincipal(viewer): MaybePrincipal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Framework>>> {
    let framework = db::frameworks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("framework"))?;

    authorize_view(
        viewer.as_ref(),
        Permission::FrameworkViewByState,
        framework.moderation.state,
    )?;
    Ok(Json(ApiResponse::ok(framework)))
}

pub async fn list(
    State(state): State<AppState>,
    MaybePrincipal(viewer): MaybePrincipal,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Framework>>>> {
    let filter = effective_state_filter(
        viewer.as_ref(),
        Permission::FrameworkViewByState,
        query.state,
    )?;
    let frameworks = db::frameworks::list(&state.pool, filter).await?;
    Ok(Json(ApiResponse::ok(frameworks)))
}

pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<FrameworkUpdate>,
) -> AppResult<Json<ApiResponse<Framework>>> {
    let existing = db::frameworks::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("framework"))?;

    if !has_permission_or_is_author(
        Some(&principal),
        Permission::FrameworkUpdateOthers,
        Permission::FrameworkUpdateOwn,
        existing.authorship.author_id,
    ) {
        return Err(AppError::forbidden("cannot update this framework"));
    }

    validate_optional_text("name", req.name.as_deref(), MAX_NAME_LEN)?;
    validate_optional_text("description", req.description.as_deref(), MAX_TEXT_LEN)?;

    let framework = db::frameworks::update(&state.pool, id, req).await?;
    Ok(Json(ApiResponse::ok(framework)))
}

pub async fn set_state(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<SetStateRequest>,
) -> AppResult<Json<ApiResponse<Framework>>> {
    authorize_set_state(&principal, Permission::FrameworkSetState)?;

    let framework = db::frameworks::set_state(&state.pool, id, req.state).await?;
    tracing::info!(
        framework_id = id,
        state = ?req.state,
        moderator = principal.id,
        "framework state changed"
    );
    Ok(Json(ApiResponse::ok(framework)))
}

pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.require(Permission::FrameworkDelete)?;

    db::frameworks::delete(&state.pool, id).await?;
    tracing::info!(framework_id = id, "framework deleted");
    Ok(Json(ApiResponse::ok(())))
}
