//! Moderation value structs
//!
//! Every crowd-sourced resource carries an author and a moderation state.
//! These are independent value structs flattened into each resource row, so
//! each concern stays independently testable.

use serde::{Deserialize, Serialize};

/// Moderation lifecycle of a submitted resource.
///
/// WAITING is the initial state for submitters without the resource type's
/// set-state permission. Moderators may move a resource between any two
/// states; there is no automatic expiry or transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ResourceState {
    Waiting,
    Approved,
    Declined,
}

/// Who submitted a resource, and when (unix seconds).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::FromRow)]
pub struct Authorship {
    pub author_id: i64,
    pub created_at: i64,
}

/// The moderation state of a resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::FromRow)]
pub struct Moderation {
    pub state: ResourceState,
}
