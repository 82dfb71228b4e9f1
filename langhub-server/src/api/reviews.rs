//! Review handlers.
//!
//! Reviews target a language and carry the same moderation lifecycle as the
//! catalog entries.

use axum::extract::{Path, Query, State};
use axum::{Json, Router};
use shared::client::{ListQuery, SetStateRequest};
use shared::models::{Review, ReviewCreate, ReviewUpdate};
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
        .route("/api/reviews", axum::routing::get(list).post(create))
        .route(
            "/api/reviews/{id}",
            axum::routing::get(get).put(update).delete(delete),
        )
        .route("/api/reviews/{id}/state", axum::routing::patch(set_state))
}

pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<ReviewCreate>,
) -> AppResult<Json<ApiResponse<Review>>> {
    principal.require(Permission::ReviewCreate)?;
    validate_required_text("title", &req.title, MAX_NAME_LEN)?;
    validate_required_text("body", &req.body, MAX_TEXT_LEN)?;

    db::languages::find_by_id(&state.pool, req.language_id)
        .await?
        .ok_or_else(|| AppError::not_found("language"))?;

    let state_for_new = initial_state(&principal, Permission::ReviewSetState);
    let review = db::reviews::create(&state.pool, req, principal.id, state_for_new).await?;

    tracing::info!(
        review_id = review.id,
        state = ?review.moderation.state,
        "review created"
    );
    Ok(Json(ApiResponse::ok(review)))
}

pub async fn get(
    State(state): State<AppState>,
    MaybePrincipal(viewer): MaybePrincipal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let review = db::reviews::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("review"))?;

    authorize_view(
        viewer.as_ref(),
        Permission::ReviewViewByState,
        review.moderation.state,
    )?;
    Ok(Json(ApiResponse::ok(review)))
}

pub async fn list(
    State(state): State<AppState>,
    MaybePrincipal(viewer): MaybePrincipal,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Review>>>> {
    let filter =
        effective_state_filter(viewer.as_ref(), Permission::ReviewViewByState, query.state)?;
    let reviews = db::reviews::list(&state.pool, filter).await?;
    Ok(Json(ApiResponse::ok(reviews)))
}

pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<ReviewUpdate>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let existing = db::reviews::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("review"))?;

    if !has_permission_or_is_author(
        Some(&principal),
        Permission::ReviewUpdateOthers,
        Permission::ReviewUpdateOwn,
        existing.authorship.author_id,
    ) {
        return Err(AppError::forbidden("cannot update this review"));
    }

    validate_optional_text("title", req.title.as_deref(), MAX_NAME_LEN)?;
    validate_optional_text("body", req.body.as_deref(), MAX_TEXT_LEN)?;

    let review = db::reviews::update(&state.pool, id, req).await?;
    Ok(Json(ApiResponse::ok(review)))
}

pub async fn set_state(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    Json(req): Json<SetStateRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    authorize_set_state(&principal, Permission::ReviewSetState)?;

    let review = db::reviews::set_state(&state.pool, id, req.state).await?;
    tracing::info!(
        review_id = id,
        state = ?req.state,
        moderator = principal.id,
        "review state changed"
    );
    Ok(Json(ApiResponse::ok(review)))
}

pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    principal.require(Permission::ReviewDelete)?;

    db::reviews::delete(&state.pool, id).await?;
    tracing::info!(review_id = id, "review deleted");
    Ok(Json(ApiResponse::ok(())))
}
