//! Review Model

use super::{Authorship, Moderation};
use serde::{Deserialize, Serialize};

/// A user review of a language.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub language_id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub authorship: Authorship,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub moderation: Moderation,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub title: String,
    pub body: String,
    pub language_id: i64,
}

/// Update review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}
