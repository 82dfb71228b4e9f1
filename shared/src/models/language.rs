//! Language Model

use super::{Authorship, Moderation};
use serde::{Deserialize, Serialize};

/// A programming language entry in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub authorship: Authorship,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub moderation: Moderation,
}

/// Create language payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update language payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
