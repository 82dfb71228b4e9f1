//! Permission Definitions
//!
//! Closed RBAC permission set. Each moderated resource type gets the same
//! six capabilities; two more cover role and user administration. A role owns
//! a subset of these, and a user's effective permissions are always exactly
//! its role's current set.

use serde::{Deserialize, Serialize};

/// A single capability. Compared by identity, serialized as
/// `resource:action` strings (the form stored in the role row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    // === Languages ===
    #[serde(rename = "languages:create")]
    LanguageCreate,
    #[serde(rename = "languages:update_own")]
    LanguageUpdateOwn,
    #[serde(rename = "languages:update_others")]
    LanguageUpdateOthers,
    #[serde(rename = "languages:delete")]
    LanguageDelete,
    #[serde(rename = "languages:set_state")]
    LanguageSetState,
    #[serde(rename = "languages:view_by_state")]
    LanguageViewByState,

    // === Frameworks ===
    #[serde(rename = "frameworks:create")]
    FrameworkCreate,
    #[serde(rename = "frameworks:update_own")]
    FrameworkUpdateOwn,
    #[serde(rename = "frameworks:update_others")]
    FrameworkUpdateOthers,
    #[serde(rename = "frameworks:delete")]
    FrameworkDelete,
    #[serde(rename = "frameworks:set_state")]
    FrameworkSetState,
    #[serde(rename = "frameworks:view_by_state")]
    FrameworkViewByState,

    // === Reviews ===
    #[serde(rename = "reviews:create")]
    ReviewCreate,
    #[serde(rename = "reviews:update_own")]
    ReviewUpdateOwn,
    #[serde(rename = "reviews:update_others")]
    ReviewUpdateOthers,
    #[serde(rename = "reviews:delete")]
    ReviewDelete,
    #[serde(rename = "reviews:set_state")]
    ReviewSetState,
    #[serde(rename = "reviews:view_by_state")]
    ReviewViewByState,

    // === Administration ===
    #[serde(rename = "roles:manage")]
    RolesManage,
    #[serde(rename = "users:manage")]
    UsersManage,
}

/// Every permission in the system, in a stable order.
pub const ALL_PERMISSIONS: &[Permission] = &[
    Permission::LanguageCreate,
    Permission::LanguageUpdateOwn,
    Permission::LanguageUpdateOthers,
    Permission::LanguageDelete,
    Permission::LanguageSetState,
    Permission::LanguageViewByState,
    Permission::FrameworkCreate,
    Permission::FrameworkUpdateOwn,
    Permission::FrameworkUpdateOthers,
    Permission::FrameworkDelete,
    Permission::FrameworkSetState,
    Permission::FrameworkViewByState,
    Permission::ReviewCreate,
    Permission::ReviewUpdateOwn,
    Permission::ReviewUpdateOthers,
    Permission::ReviewDelete,
    Permission::ReviewSetState,
    Permission::ReviewViewByState,
    Permission::RolesManage,
    Permission::UsersManage,
];

/// Default permissions for self-registered users.
pub const DEFAULT_MEMBER_PERMISSIONS: &[Permission] = &[
    Permission::LanguageCreate,
    Permission::LanguageUpdateOwn,
    Permission::FrameworkCreate,
    Permission::FrameworkUpdateOwn,
    Permission::ReviewCreate,
    Permission::ReviewUpdateOwn,
];

impl Permission {
    /// The wire/storage string for this permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LanguageCreate => "languages:create",
            Self::LanguageUpdateOwn => "languages:update_own",
            Self::LanguageUpdateOthers => "languages:update_others",
            Self::LanguageDelete => "languages:delete",
            Self::LanguageSetState => "languages:set_state",
            Self::LanguageViewByState => "languages:view_by_state",
            Self::FrameworkCreate => "frameworks:create",
            Self::FrameworkUpdateOwn => "frameworks:update_own",
            Self::FrameworkUpdateOthers => "frameworks:update_others",
            Self::FrameworkDelete => "frameworks:delete",
            Self::FrameworkSetState => "frameworks:set_state",
            Self::FrameworkViewByState => "frameworks:view_by_state",
            Self::ReviewCreate => "reviews:create",
            Self::ReviewUpdateOwn => "reviews:update_own",
            Self::ReviewUpdateOthers => "reviews:update_others",
            Self::ReviewDelete => "reviews:delete",
            Self::ReviewSetState => "reviews:set_state",
            Self::ReviewViewByState => "reviews:view_by_state",
            Self::RolesManage => "roles:manage",
            Self::UsersManage => "users:manage",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PERMISSIONS
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown permission: {s}"))
    }
}
