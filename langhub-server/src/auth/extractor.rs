//! Principal extractors
//!
//! Turns a bearer access token into a request-scoped [`Principal`]. The role
//! is re-read from storage on every request: tokens are never revoked, so a
//! role may have been edited or deleted since the token was issued, and the
//! permission set must reflect storage as of *this* request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shared::AppError;

use crate::auth::{JwtService, Principal, TokenKind};
use crate::core::AppState;
use crate::db;

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved earlier in this request
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let claims = state
            .jwt
            .verify_header(auth_header, TokenKind::Access)
            .inspect_err(|e| {
                tracing::warn!(error = %e, uri = %parts.uri, "token verification failed");
            })?;
        let user_id = JwtService::subject_id(&claims)?;

        // The role referenced by the token may be gone; a live token must not
        // outlive its role.
        let role = db::roles::find_by_id(&state.pool, claims.role_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(role_id = claims.role_id, "token references a deleted role");
                AppError::not_found("role")
            })?;

        let principal = Principal::new(user_id, role.id, role.permissions.iter().copied());
        parts.extensions.insert(principal.clone());
        Ok(principal)
    }
}

/// Extractor for routes that serve anonymous callers too.
///
/// A missing Authorization header resolves to an anonymous viewer; a header
/// that is present but fails verification is still an error.
pub struct MaybePrincipal(pub Option<Principal>);

impl FromRequestParts<AppState> for MaybePrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(http::header::AUTHORIZATION) {
            return Ok(MaybePrincipal(None));
        }
        let principal = Principal::from_request_parts(parts, state).await?;
        Ok(MaybePrincipal(Some(principal)))
    }
}
