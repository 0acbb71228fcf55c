//! Database access for profile-board
//!
//! SQLite via sqlx. The schema is created on startup and is idempotent, so
//! the service starts against an empty root folder without any manual setup.

pub mod posts;
pub mod profiles;
pub mod settings;

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Initialize database connection pool
///
/// Opens (creating if needed) the database file and runs schema
/// initialization. Foreign keys are enforced on every connection.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let options = SqliteConnectOptions::from_str(&db_url)?.foreign_keys(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize an in-memory database pool with the full schema
///
/// Used by tests; a single connection keeps the in-memory database alive
/// and visible to every query.
pub async fn init_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize tables
///
/// Creates profiles, posts and settings tables if they don't exist
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            guid TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            bio TEXT NOT NULL DEFAULT '',
            avatar_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            guid TEXT PRIMARY KEY,
            profile_guid TEXT NOT NULL REFERENCES profiles(guid) ON DELETE CASCADE,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_profile ON posts(profile_guid)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (profiles, posts, settings)");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_tables_is_idempotent() {
        let pool = init_memory_pool().await.unwrap();

        // Running initialization again must not fail
        init_tables(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_database_file_created_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("board.db");

        let pool = init_database_pool(&db_path).await.unwrap();
        pool.close().await;

        assert!(db_path.exists());
    }
}
