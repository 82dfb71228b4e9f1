//! Domain models
//!
//! Plain rows mapped with `sqlx::FromRow` plus the create/update payloads the
//! handlers accept. Moderated resources compose the `Authorship` and
//! `Moderation` value structs instead of sharing a base type.

pub mod framework;
pub mod image_ref;
pub mod language;
pub mod moderation;
pub mod review;
pub mod role;
pub mod user;

pub use framework::{Framework, FrameworkCreate, FrameworkUpdate};
pub use image_ref::ImageRef;
pub use language::{Language, LanguageCreate, LanguageUpdate};
pub use moderation::{Authorship, Moderation, ResourceState};
pub use review::{Review, ReviewCreate, ReviewUpdate};
pub use role::{Role, RoleCreate, RoleUpdate};
pub use user::{User, UserInfo};
