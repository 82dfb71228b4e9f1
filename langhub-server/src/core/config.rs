//! Server configuration

use crate::auth::JwtConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, loaded from environment variables.
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite://langhub.db?mode=rwc | SQLite database |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | (required outside development) | shared signing secret |
/// | ACCESS_TOKEN_TTL_SECS | 900 | access token lifetime |
/// | REFRESH_TOKEN_TTL_SECS | 2592000 | refresh token lifetime |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    pub environment: String,
    pub jwt: JwtConfig,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let secret = Self::require_secret("JWT_SECRET", &environment)?;
        if secret.len() < 32 && environment != "development" {
            return Err("JWT_SECRET must be at least 32 characters long".into());
        }

        let defaults = JwtConfig::default();
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://langhub.db?mode=rwc".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig {
                secret,
                access_ttl_secs: std::env::var("ACCESS_TOKEN_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.access_ttl_secs),
                refresh_ttl_secs: std::env::var("REFRESH_TOKEN_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.refresh_ttl_secs),
            },
            environment,
        })
    }

    /// Is this a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
