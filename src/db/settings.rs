//! Settings database operations
//!
//! Get/set accessors over the key-value settings table.

use sqlx::SqlitePool;

use crate::{Error, Result};

/// Default board title when none has been configured
pub const DEFAULT_BOARD_TITLE: &str = "Profile Board";

/// Get the configured board title, falling back to the default
pub async fn get_board_title(db: &SqlitePool) -> Result<String> {
    get_setting::<String>(db, "board_title")
        .await
        .map(|opt| opt.unwrap_or_else(|| DEFAULT_BOARD_TITLE.to_string()))
}

/// Set the board title
pub async fn set_board_title(db: &SqlitePool, title: String) -> Result<()> {
    set_setting(db, "board_title", title).await
}

/// Generic setting getter (internal)
async fn get_setting<T>(db: &SqlitePool, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await
        .map_err(Error::Database)?;

    match row {
        Some((value,)) => {
            let parsed = value
                .parse::<T>()
                .map_err(|e| Error::Config(format!("Parse setting failed: {}", e)))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Generic setting setter (internal)
async fn set_setting<T>(db: &SqlitePool, key: &str, value: T) -> Result<()>
where
    T: std::fmt::Display,
{
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_pool;

    #[tokio::test]
    async fn test_board_title_default_when_unset() {
        let pool = init_memory_pool().await.unwrap();

        let title = get_board_title(&pool).await.unwrap();
        assert_eq!(title, DEFAULT_BOARD_TITLE);
    }

    #[tokio::test]
    async fn test_set_and_get_board_title() {
        let pool = init_memory_pool().await.unwrap();

        set_board_title(&pool, "Team Wall".to_string()).await.unwrap();

        let title = get_board_title(&pool).await.unwrap();
        assert_eq!(title, "Team Wall");
    }

    #[tokio::test]
    async fn test_set_board_title_upserts() {
        let pool = init_memory_pool().await.unwrap();

        set_board_title(&pool, "First".to_string()).await.unwrap();
        set_board_title(&pool, "Second".to_string()).await.unwrap();

        assert_eq!(get_board_title(&pool).await.unwrap(), "Second");

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM settings WHERE key = 'board_title'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 1, "Should have exactly one entry after update");
    }

    #[tokio::test]
    async fn test_typed_setting_roundtrip() {
        let pool = init_memory_pool().await.unwrap();

        set_setting(&pool, "feed_refresh_seconds", 30i64).await.unwrap();

        let value: Option<i64> = get_setting(&pool, "feed_refresh_seconds").await.unwrap();
        assert_eq!(value, Some(30));
    }

    #[tokio::test]
    async fn test_typed_setting_parse_failure() {
        let pool = init_memory_pool().await.unwrap();

        set_setting(&pool, "feed_refresh_seconds", "not-a-number").await.unwrap();

        let result: Result<Option<i64>> = get_setting(&pool, "feed_refresh_seconds").await;
        assert!(result.is_err());
    }
}
