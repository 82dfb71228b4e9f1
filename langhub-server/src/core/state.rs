//! Application state

use sqlx::SqlitePool;

use crate::auth::{JwtConfig, JwtService};
use crate::core::Config;
use crate::db;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt: JwtService,
}

impl AppState {
    /// Create a new AppState: connect, migrate, seed the role table.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await?;
        db::roles::ensure_seed(&pool).await?;

        Ok(Self {
            pool,
            jwt: JwtService::new(config.jwt.clone()),
        })
    }

    /// State backed by a fresh in-memory database. Used by tests.
    pub async fn connect_in_memory() -> Result<Self, BoxError> {
        let pool = db::connect("sqlite::memory:").await?;
        db::migrate(&pool).await?;
        db::roles::ensure_seed(&pool).await?;

        Ok(Self {
            pool,
            jwt: JwtService::new(JwtConfig::default()),
        })
    }
}
