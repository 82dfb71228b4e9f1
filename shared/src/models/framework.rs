//! Framework Model

use super::{Authorship, Moderation};
use serde::{Deserialize, Serialize};

/// A framework entry, tied to the language it is built for.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Framework {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub language_id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub authorship: Authorship,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub moderation: Moderation,
}

/// Create framework payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkCreate {
    pub name: String,
    pub description: Option<String>,
    pub language_id: i64,
}

/// Update framework payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameworkUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
