//! Request/response DTOs for the public API
//!
//! Shared between the server and any API client.

use crate::models::{ResourceState, Role, UserInfo};
use serde::{Deserialize, Serialize};

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token pair returned by login and refresh.
///
/// Expiries are unix timestamps (seconds). Access and refresh tokens are
/// distinguishable only by which signing algorithm verifies them; there is no
/// type claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub role: Role,
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expires: i64,
    pub refresh_token_expires: i64,
}

/// POST /api/auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub image_id: Option<i64>,
}

/// Registration returns the created user's public projection.
pub type RegisterResponse = UserInfo;

/// PATCH /api/{languages,frameworks,reviews}/{id}/state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStateRequest {
    pub state: ResourceState,
}

/// Optional state filter on list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub state: Option<ResourceState>,
}
