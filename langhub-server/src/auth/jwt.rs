//! JWT token service
//!
//! Issues and verifies the access/refresh token pair. Both tokens are signed
//! from one shared secret but with different HMAC algorithms (HS256 for
//! access, HS384 for refresh), so a token replayed as the other kind fails
//! signature-level verification rather than a business-rule check. There is
//! deliberately no `type` claim.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::AppError;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared signing secret (at least 32 bytes in production)
    pub secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "langhub-development-secret-not-for-production".to_string(),
            access_ttl_secs: 15 * 60,
            refresh_ttl_secs: 30 * 24 * 60 * 60,
        }
    }
}

/// Which of the two token kinds a caller expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// The signing algorithm bound to this kind. The binding is the only
    /// thing that distinguishes the two kinds on the wire.
    pub fn algorithm(self) -> Algorithm {
        match self {
            Self::Access => Algorithm::HS256,
            Self::Refresh => Algorithm::HS384,
        }
    }

    fn ttl_secs(self, config: &JwtConfig) -> i64 {
        match self {
            Self::Access => config.access_ttl_secs,
            Self::Refresh => config.refresh_ttl_secs,
        }
    }
}

/// Claims stored in both token kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    /// Id of the user's role at issue time; re-resolved on every request
    pub role_id: i64,
    /// Issued-at timestamp
    pub iat: i64,
    /// Expiry timestamp
    pub exp: i64,
}

/// A freshly issued token pair with its expiries (unix seconds).
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_at: i64,
    pub refresh_expires_at: i64,
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a fresh access/refresh pair for a user.
    pub fn issue_pair(&self, user_id: i64, role_id: i64) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_expires_at = (now
            + Duration::seconds(TokenKind::Access.ttl_secs(&self.config)))
        .timestamp();
        let refresh_expires_at = (now
            + Duration::seconds(TokenKind::Refresh.ttl_secs(&self.config)))
        .timestamp();

        let access_token = self.sign(
            TokenKind::Access,
            user_id,
            role_id,
            now.timestamp(),
            access_expires_at,
        )?;
        let refresh_token = self.sign(
            TokenKind::Refresh,
            user_id,
            role_id,
            now.timestamp(),
            refresh_expires_at,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn sign(
        &self,
        kind: TokenKind,
        user_id: i64,
        role_id: i64,
        iat: i64,
        exp: i64,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            role_id,
            iat,
            exp,
        };
        encode(&Header::new(kind.algorithm()), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("token generation failed: {e}")))
    }

    /// Strip the `Bearer ` prefix from an Authorization header value.
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// Verify a raw `Authorization` header value as the given token kind.
    ///
    /// Checks run in a fixed order, and the first applicable failure wins:
    /// header presence and `Bearer ` prefix, algorithm for the kind,
    /// signature, expiry, claim shape, then everything else.
    pub fn verify_header(
        &self,
        header: Option<&str>,
        kind: TokenKind,
    ) -> Result<Claims, AppError> {
        let header = header.ok_or(AppError::MissingToken)?;
        let token = Self::extract_from_header(header).ok_or(AppError::MissingToken)?;
        self.verify(token, kind)
    }

    /// Verify a bare token string as the given kind.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, AppError> {
        let mut validation = Validation::new(kind.algorithm());
        validation.set_required_spec_claims(&["sub", "exp"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidAlgorithm => AppError::WrongTokenType,
                ErrorKind::InvalidSignature => AppError::InvalidSignature,
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                ErrorKind::Json(err) => AppError::invalid_claim(err.to_string()),
                ErrorKind::MissingRequiredClaim(claim) => AppError::invalid_claim(claim.clone()),
                _ => AppError::UnknownToken {
                    message: e.to_string(),
                },
            }
        })?;

        Ok(data.claims)
    }

    /// Parse the numeric user id out of verified claims.
    pub fn subject_id(claims: &Claims) -> Result<i64, AppError> {
        claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::invalid_claim("sub"))
    }
}
