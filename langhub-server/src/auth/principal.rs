//! Request-scoped principal and authorization predicates
//!
//! A `Principal` is rebuilt from a verified access token on every request;
//! it is never persisted. The predicates here are pure functions of their
//! inputs, so route handlers can be tested without any HTTP plumbing.

use shared::Permission;
use std::collections::HashSet;

/// The authenticated identity plus its resolved permission set.
///
/// The permission set is always the user's role's *current* set, re-read from
/// storage per request: tokens are not revoked on role edits, so a permission
/// revocation must take effect on the very next request.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i64,
    pub role_id: i64,
    pub permissions: HashSet<Permission>,
}

impl Principal {
    pub fn new(id: i64, role_id: i64, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            id,
            role_id,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Membership test against the resolved permission set.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Fail-fast guard for handlers that need a single capability.
    pub fn require(&self, permission: Permission) -> Result<(), shared::AppError> {
        if self.has_permission(permission) {
            return Ok(());
        }
        tracing::warn!(
            user_id = self.id,
            required_permission = %permission,
            "permission denied"
        );
        Err(shared::AppError::forbidden(format!(
            "missing permission {permission}"
        )))
    }
}

/// Owner-vs-others capability check.
///
/// The two branches are exclusive on purpose: when the principal IS the
/// author, only `for_own` is consulted; when it is not, only `for_others`.
/// Holding the "others" permission grants nothing on one's own resource, and
/// vice versa. An unresolved (anonymous) principal is denied, never an error.
pub fn has_permission_or_is_author(
    principal: Option<&Principal>,
    for_others: Permission,
    for_own: Permission,
    author_id: i64,
) -> bool {
    let Some(principal) = principal else {
        return false;
    };
    if principal.id == author_id {
        principal.has_permission(for_own)
    } else {
        principal.has_permission(for_others)
    }
}
