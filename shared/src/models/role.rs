//! Role Model

use crate::permissions::Permission;
use serde::{Deserialize, Serialize};

/// Role entity (RBAC)
///
/// Exactly one role in the system is the default; self-registered users are
/// assigned it. The permission list is stored as a JSON array of permission
/// strings in the role row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    pub id: i64,
    pub title: String,
    pub is_default: bool,
    #[sqlx(json)]
    pub permissions: Vec<Permission>,
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCreate {
    pub title: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Update role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub title: Option<String>,
    pub is_default: Option<bool>,
    pub permissions: Option<Vec<Permission>>,
}
