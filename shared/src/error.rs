//! Error types for the shared crate
//!
//! One unified error type carrying a kind tag; every authentication,
//! authorization, and CRUD failure is expressed as a variant and translated
//! to an HTTP status at a single boundary (`IntoResponse`).

use crate::response::ApiResponse;
use http::StatusCode;
use thiserror::Error;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// No or malformed Authorization header (401)
    MissingToken,
    /// Token signed with the wrong algorithm for the expected kind (403)
    WrongTokenType,
    /// Signature check failed (403)
    InvalidSignature,
    /// `exp` claim in the past (403)
    TokenExpired,
    /// Required claim missing or malformed (403)
    InvalidClaim,
    /// Any other token decode failure (403)
    UnknownToken,
    /// Principal resolved but lacks the needed capability (403)
    NotEnoughPermission,
    /// No account with this email (401)
    EmailWrong,
    /// Password does not match (401)
    PasswordWrong,
    /// Account disabled or locked (403)
    AccountDisabled,
    /// Unique constraint violated (400)
    DuplicateResource,
    /// Referenced id absent (404)
    ResourceNotFound,
    /// Structurally invalid input (400)
    BadRequest,
    /// Business rule violation (422)
    BusinessRule,
    /// Database error (500)
    Database,
    /// Internal server error (500)
    Internal,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::WrongTokenType => StatusCode::FORBIDDEN,
            Self::InvalidSignature => StatusCode::FORBIDDEN,
            Self::TokenExpired => StatusCode::FORBIDDEN,
            Self::InvalidClaim => StatusCode::FORBIDDEN,
            Self::UnknownToken => StatusCode::FORBIDDEN,
            Self::NotEnoughPermission => StatusCode::FORBIDDEN,
            Self::EmailWrong => StatusCode::UNAUTHORIZED,
            Self::PasswordWrong => StatusCode::UNAUTHORIZED,
            Self::AccountDisabled => StatusCode::FORBIDDEN,
            Self::DuplicateResource => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::BusinessRule => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::MissingToken => "E3001",
            Self::WrongTokenType => "E3002",
            Self::InvalidSignature => "E3003",
            Self::TokenExpired => "E3004",
            Self::InvalidClaim => "E3005",
            Self::UnknownToken => "E3006",
            Self::NotEnoughPermission => "E2001",
            Self::EmailWrong => "E3101",
            Self::PasswordWrong => "E3102",
            Self::AccountDisabled => "E3103",
            Self::DuplicateResource => "E0004",
            Self::ResourceNotFound => "E0003",
            Self::BadRequest => "E0002",
            Self::BusinessRule => "E0005",
            Self::Database => "E9002",
            Self::Internal => "E9001",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the framework
#[derive(Debug, Error)]
pub enum AppError {
    /// No or malformed Authorization header
    #[error("Missing bearer token")]
    MissingToken,

    /// Token verified with the wrong algorithm for the expected kind
    #[error("Wrong token type")]
    WrongTokenType,

    /// Signature check failed
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Required claim missing or malformed
    #[error("Invalid claim: {claim}")]
    InvalidClaim { claim: String },

    /// Any other token decode failure
    #[error("Unknown token error: {message}")]
    UnknownToken { message: String },

    /// Permission denied
    #[error("Not enough permission: {message}")]
    NotEnoughPermission { message: String },

    /// No account with this email
    #[error("No account for this email")]
    EmailWrong,

    /// Password mismatch
    #[error("Wrong password")]
    PasswordWrong,

    /// Account disabled or locked
    #[error("Account disabled: {message}")]
    AccountDisabled { message: String },

    /// Unique constraint violated
    #[error("Duplicate {resource}: field {field}")]
    Duplicate { resource: String, field: String },

    /// Referenced id absent
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Structurally invalid input
    #[error("{message}")]
    Validation { message: String },

    /// Business rule violation
    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    /// Database error
    #[error("Database error: {message}")]
    Database { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    // ========== Convenient constructors ==========

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database { message: message.into() }
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create a NotEnoughPermission error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::NotEnoughPermission { message: message.into() }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a Duplicate error
    pub fn duplicate(resource: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Duplicate { resource: resource.into(), field: field.into() }
    }

    /// Create a BusinessRule error
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule { message: message.into() }
    }

    /// Create an InvalidClaim error
    pub fn invalid_claim(claim: impl Into<String>) -> Self {
        Self::InvalidClaim { claim: claim.into() }
    }

    /// Create an AccountDisabled error
    pub fn account_disabled(message: impl Into<String>) -> Self {
        Self::AccountDisabled { message: message.into() }
    }

    // ========== Error inspection methods ==========

    /// Get the error code for this error
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            Self::MissingToken => ApiErrorCode::MissingToken,
            Self::WrongTokenType => ApiErrorCode::WrongTokenType,
            Self::InvalidSignature => ApiErrorCode::InvalidSignature,
            Self::TokenExpired => ApiErrorCode::TokenExpired,
            Self::InvalidClaim { .. } => ApiErrorCode::InvalidClaim,
            Self::UnknownToken { .. } => ApiErrorCode::UnknownToken,
            Self::NotEnoughPermission { .. } => ApiErrorCode::NotEnoughPermission,
            Self::EmailWrong => ApiErrorCode::EmailWrong,
            Self::PasswordWrong => ApiErrorCode::PasswordWrong,
            Self::AccountDisabled { .. } => ApiErrorCode::AccountDisabled,
            Self::Duplicate { .. } => ApiErrorCode::DuplicateResource,
            Self::NotFound { .. } => ApiErrorCode::ResourceNotFound,
            Self::Validation { .. } => ApiErrorCode::BadRequest,
            Self::BusinessRule { .. } => ApiErrorCode::BusinessRule,
            Self::Database { .. } => ApiErrorCode::Database,
            Self::Internal { .. } => ApiErrorCode::Internal,
        }
    }

    /// Client-facing message. 500-class errors are replaced with a generic
    /// message; the detail stays server-side.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database { .. } | Self::Internal { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let code = self.error_code();
        let status = code.status_code();

        // Never leak internals to the client, but keep them in the log.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code = %code, "internal error");
        }

        let body = ApiResponse::<()>::error(code.code(), self.public_message());
        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::database(e.to_string())
    }
}

/// Result type for API operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_map_to_spec_statuses() {
        assert_eq!(
            AppError::MissingToken.error_code().status_code(),
            StatusCode::UNAUTHORIZED
        );
        for err in [
            AppError::WrongTokenType,
            AppError::InvalidSignature,
            AppError::TokenExpired,
            AppError::invalid_claim("role_id"),
            AppError::UnknownToken { message: "garbage".into() },
            AppError::forbidden("nope"),
        ] {
            assert_eq!(err.error_code().status_code(), StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn credential_errors_are_401_and_distinguished() {
        assert_eq!(AppError::EmailWrong.error_code().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::PasswordWrong.error_code().status_code(), StatusCode::UNAUTHORIZED);
        assert_ne!(AppError::EmailWrong.error_code().code(), AppError::PasswordWrong.error_code().code());
    }

    #[test]
    fn internal_errors_never_leak_detail() {
        let err = AppError::database("connection refused on 10.0.0.3");
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(
            AppError::duplicate("user", "email").error_code().status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("role").error_code().status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
