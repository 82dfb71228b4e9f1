//! Health check

use axum::{Json, Router};
use serde::Serialize;
use shared::ApiResponse;

use crate::core::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", axum::routing::get(health))
}

pub async fn health() -> Json<ApiResponse<Health>> {
    Json(ApiResponse::ok(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
