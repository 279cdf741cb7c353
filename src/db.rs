use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::config::DATABASE_URI;
use crate::error::StartupError;

const MAX_CONNECTIONS: u32 = 5;

/// Opens the pool, probes it once, and applies pending migrations.
pub async fn init_pool(database_uri: &str) -> Result<SqlitePool, StartupError> {
    // Ensure data directory exists
    if let Some(path) = database_uri.strip_prefix("sqlite:") {
        let path = path.trim_start_matches("//");
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let options = SqliteConnectOptions::from_str(database_uri)
        .map_err(|e| StartupError::InvalidConfig {
            key: DATABASE_URI,
            reason: e.to_string(),
        })?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(StartupError::Connect)?;

    ping(&pool).await?;
    run_migrations(&pool).await?;

    Ok(pool)
}

pub async fn ping(pool: &SqlitePool) -> Result<(), StartupError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(StartupError::Ping)?;
    Ok(())
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StartupError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_pool_is_ready() {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookmarks")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
        pool.close().await;
    }

    #[tokio::test]
    async fn unparseable_uri_is_invalid_config() {
        let err = init_pool("sqlite::memory:?flavour=postgres").await.unwrap_err();
        assert!(matches!(err, StartupError::InvalidConfig { key: DATABASE_URI, .. }));
    }
}
