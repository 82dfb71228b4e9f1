//! User Model

use super::{ImageRef, Role};
use serde::{Deserialize, Serialize};

/// User row. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role_id: i64,
    pub enabled: bool,
    pub locked: bool,
    pub image_id: Option<i64>,
    pub created_at: i64,
}

/// Public projection of a user (no credential material), with its role and
/// image resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub image: Option<ImageRef>,
    pub enabled: bool,
    pub locked: bool,
    pub created_at: i64,
}

impl UserInfo {
    /// Assemble the public projection from its parts.
    pub fn from_parts(user: User, role: Role, image: Option<ImageRef>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            role,
            image,
            enabled: user.enabled,
            locked: user.locked,
            created_at: user.created_at,
        }
    }
}
