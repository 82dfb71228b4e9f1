//! Authentication handlers: login, registration, token refresh, whoami.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
use shared::models::UserInfo;
use shared::{ApiResponse, AppError, AppResult};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{JwtService, Principal, TokenKind};
use crate::core::AppState;
use crate::db;
use crate::utils::validation::{
    MAX_NAME_LEN, normalize_email, validate_email, validate_password, validate_required_text,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/refresh", get(refresh))
        .route("/api/auth/me", get(me))
}

/// POST /api/auth/login
///
/// Email and password failures are reported as distinct codes on purpose;
/// both map to 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let email = normalize_email(&req.email);

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or(AppError::EmailWrong)?;

    ensure_account_active(&user)?;

    if !verify_password(&req.password, &user.password_hash) {
        tracing::warn!(user_id = user.id, "failed login attempt");
        return Err(AppError::PasswordWrong);
    }

    let role = db::roles::find_by_id(&state.pool, user.role_id)
        .await?
        .ok_or_else(|| AppError::not_found("role"))?;

    let pair = state.jwt.issue_pair(user.id, role.id)?;
    tracing::info!(user_id = user.id, role = %role.title, "user logged in");

    Ok(Json(ApiResponse::ok(LoginResponse {
        role,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        access_token_expires: pair.access_expires_at,
        refresh_token_expires: pair.refresh_expires_at,
    })))
}

/// POST /api/auth/register
///
/// Self-registration always lands on the single default role.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    validate_required_text("name", &req.name, MAX_NAME_LEN)?;
    validate_required_text("username", &req.username, MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let email = normalize_email(&req.email);

    let image = match req.image_id {
        Some(image_id) => Some(
            db::images::find_by_id(&state.pool, image_id)
                .await?
                .ok_or_else(|| AppError::not_found("image"))?,
        ),
        None => None,
    };

    let role = db::roles::find_default(&state.pool)
        .await?
        .ok_or_else(|| AppError::internal("no default role configured"))?;

    let password_hash = hash_password(&req.password)?;
    let user = db::users::create(
        &state.pool,
        db::users::NewUser {
            name: req.name.trim(),
            username: req.username.trim(),
            email: &email,
            password_hash: &password_hash,
            role_id: role.id,
            image_id: image.as_ref().map(|i| i.id),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(Json(ApiResponse::ok(UserInfo::from_parts(user, role, image))))
}

/// GET /api/auth/refresh
///
/// Takes a refresh token in the Authorization header and returns a fresh
/// pair. The account and role are re-checked: a disabled account or deleted
/// role cannot mint new tokens.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let claims = state.jwt.verify_header(auth_header, TokenKind::Refresh)?;
    let user_id = JwtService::subject_id(&claims)?;

    let user = db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;
    ensure_account_active(&user)?;

    // The role may have changed since issue; the new pair carries the current
    // assignment.
    let role = db::roles::find_by_id(&state.pool, user.role_id)
        .await?
        .ok_or_else(|| AppError::not_found("role"))?;

    let pair = state.jwt.issue_pair(user.id, role.id)?;
    tracing::debug!(user_id = user.id, "token pair refreshed");

    Ok(Json(ApiResponse::ok(LoginResponse {
        role,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        access_token_expires: pair.access_expires_at,
        refresh_token_expires: pair.refresh_expires_at,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    principal: Principal,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let user = db::users::find_by_id(&state.pool, principal.id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;
    let role = db::roles::find_by_id(&state.pool, user.role_id)
        .await?
        .ok_or_else(|| AppError::not_found("role"))?;
    let image = match user.image_id {
        Some(image_id) => db::images::find_by_id(&state.pool, image_id).await?,
        None => None,
    };

    Ok(Json(ApiResponse::ok(UserInfo::from_parts(user, role, image))))
}

fn ensure_account_active(user: &shared::models::User) -> AppResult<()> {
    if !user.enabled {
        return Err(AppError::account_disabled("account is disabled"));
    }
    if user.locked {
        return Err(AppError::account_disabled("account is locked"));
    }
    Ok(())
}
