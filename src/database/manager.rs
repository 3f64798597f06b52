use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from the data layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Process-wide connection pool, created lazily on first use and read-only
/// thereafter.
pub async fn pool() -> Result<&'static PgPool, DatabaseError> {
    POOL.get_or_try_init(|| async {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let db_config = &config::config().database;

        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connection_timeout))
            .connect(&url)
            .await?;

        info!("Created database pool");
        Ok(pool)
    })
    .await
}

/// Pings the pool to ensure connectivity
pub async fn health_check() -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool().await?).await?;
    Ok(())
}
