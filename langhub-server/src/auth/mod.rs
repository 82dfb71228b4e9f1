//! Authentication and authorization
//!
//! - [`jwt`]: access/refresh token issuance and verification
//! - [`principal`]: the request-scoped identity and permission predicates
//! - [`extractor`]: axum extractors resolving a bearer token to a principal
//! - [`password`]: argon2 hashing

pub mod extractor;
pub mod jwt;
pub mod password;
pub mod principal;

pub use extractor::MaybePrincipal;
pub use jwt::{Claims, JwtConfig, JwtService, TokenKind, TokenPair};
pub use principal::{Principal, has_permission_or_is_author};
