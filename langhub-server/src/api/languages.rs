//! Language catalog handlers.
//!
//! Reads are open to anonymous callers but narrowed to APPROVED content
//! unless the caller holds `languages:view_by_state`. Writes go through the
//! owner-vs-others permission split.

use axum::extract::{Path, Query, State};
use axum::{Json, Router};
use shared::client::{ListQuery, SetStateRequest};
use shared::models::{Language, LanguageCreate, LanguageUpdate};
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
        .route("/api/languages", axum::routing::get(list).post(create))
        .route(
            "/api/languages/{id}",
            axum::routing::get(get).put(update).delete(delete),
        )
        .route("/api/languages/{id}/state", axum::routing::patch(set_state))
}

pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<LanguageCreate>,
) -> AppResult<Json<ApiResponse<Language>>> {
    principal.require(Permission::LanguageCreate)?;
    validate_required_text("name", &req.name, MAX_NAME_LEN)?;
    validate_optional_text("description", req.description.as_deref(), MAX_TEXT_LEN)?;

    let state_for_new = initial_state(&principal, Permission::LanguageSetState);
    let language = db::languages::create(&state.pool, req, principal.id, state_for_new).await?;

    tracing::info!(
        language_id = language.id,
        state = ?language.moderation.state,
        "language created"
    );
    Ok(Json(ApiResponse::ok(language)))
}

pub async fn get(
    State(state): State<AppState>,
    MaybePrincipal(viewer): MaybePrincipal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Language>>> {
    let language = db::languages::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("language"))?;

    authorize_view(
        viewer.as_ref(),
        Permission::LanguageViewByState,
        language.moderation.state,
    )?;
    Ok(Json(ApiResponse::ok(language)))
}

pub async fn list(
    State(state): State<AppState>,
    MaybePrincipal(viewer): MaybePrincipal,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Language>>>> {
    let filter = effective_state_filter(
        viewer.as_ref(),
        Permission::LanguageViewByState,
        query.state,
    )?;
    let languages = db::languages::list(&state.pool, filter).await?;
    Ok(Json(ApiResponse::ok(languages)))
}

pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<LanguageUpdate>,
) -> AppResult<Json<ApiResponse<Language>>> {
    let existing = db::languages::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("language"))?;

    if !has_permission_or_is_author(
        Some(&principal),
        Permission::LanguageUpdateOthers,
        Permission::LanguageUpdateOwn,
        existing.authorship.author_id,
    ) {
        return Err(AppError::forbidden("cannot update this language"));
    }

    validate_optional_text("name", req.name.as_deref(), MAX_NAME_LEN)?;
    validate_optional_text("description", req.description.as_deref(), MAX_TEXT_LEN)?;

    let language = db::languages::update(&state.pool, id, req).await?;
    Ok(Json(ApiResponse::ok(language)))
}

pub async fn set_state(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<SetStateRequest>,
) -> AppResult<Json<ApiResponse<Language>>> {
    authorize_set_state(&principal, Permission::LanguageSetState)?;

    let language = db::languages::set_state(&state.pool, id, req.state).await?;
    tracing::info!(
        language_id = id,
        state = ?req.state,
        moderator = principal.id,
        "language state changed"
    );
    Ok(Json(ApiResponse::ok(language)))
}

pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.require(Permission::LanguageDelete)?;

    db::languages::delete(&state.pool, id).await?;
    tracing::info!(language_id = id, "language deleted");
    Ok(Json(ApiResponse::ok(())))
}
