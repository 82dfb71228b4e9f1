//! Shared types for LangHub
//!
//! Common types used across the workspace: the error taxonomy, the unified
//! API response envelope, the closed permission set, domain models, and the
//! request/response DTOs of the public API.

pub mod client;
pub mod error;
pub mod models;
pub mod permissions;
pub mod response;

// Re-exports
pub use error::{ApiErrorCode, AppError, AppResult};
pub use permissions::Permission;
pub use response::ApiResponse;
