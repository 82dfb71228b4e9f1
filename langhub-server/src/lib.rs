//! LangHub API server
//!
//! Moderated, crowd-sourced catalog of programming languages, frameworks,
//! and reviews. Authentication is a JWT access/refresh pair signed from one
//! shared secret with kind-specific HMAC algorithms; authorization is a
//! closed RBAC permission set resolved from the user's role on every request.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod moderation;
pub mod utils;

pub use crate::core::{AppState, Config};
