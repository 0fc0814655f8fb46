//! Connection pool lifecycle and embedded schema migrations.
//!
//! The pool is opened once in `main`, shared through [`crate::AppState`], and
//! closed on shutdown. Nothing in the crate reaches for a global pool.

use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Upper bound on waiting for a free connection before a request fails.
const ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Open the PostgreSQL pool used by every service call.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect(database_url)
        .await
}

/// Apply the schema and stored procedure definitions shipped in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
