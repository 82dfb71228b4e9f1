//! Database layer
//!
//! Free-function repositories over a `SqlitePool`, one module per table.
//! Queries use runtime binding so builds never need a live database.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub mod frameworks;
pub mod images;
pub mod languages;
pub mod reviews;
pub mod roles;
pub mod users;

/// Open a connection pool.
///
/// An in-memory SQLite database exists per connection, so those URLs are
/// pinned to a single connection or each checkout would see an empty schema.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run the embedded migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Current unix timestamp in seconds, the storage format for `created_at`.
pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Translate a unique-constraint violation into a Duplicate error naming the
/// offending field; everything else stays a database error.
pub(crate) fn map_unique(
    err: sqlx::Error,
    resource: &str,
    fields: &[&str],
) -> shared::AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = db_err.message().to_string();
            let field = fields
                .iter()
                .find(|f| message.contains(&format!("{resource}.{f}")))
                .copied()
                .unwrap_or(fields.first().copied().unwrap_or("unknown"));
            return shared::AppError::duplicate(resource, field);
        }
    }
    err.into()
}
