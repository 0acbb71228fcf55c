//! Post database operations
//!
//! Posts always belong to a profile; the board feed joins each post with
//! its author's display name.

use sqlx::SqlitePool;

use crate::models::{BoardEntry, Post};
use crate::{Error, Result};

/// Row tuple: guid, profile_guid, body, created_at
type PostRow = (String, String, String, String);

fn post_from_row(row: PostRow) -> Post {
    Post {
        guid: row.0,
        profile_guid: row.1,
        body: row.2,
        created_at: row.3,
    }
}

/// Insert a new post
pub async fn insert_post(db: &SqlitePool, post: &Post) -> Result<()> {
    sqlx::query(
        "INSERT INTO posts (guid, profile_guid, body, created_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&post.guid)
    .bind(&post.profile_guid)
    .bind(&post.body)
    .bind(&post.created_at)
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

/// Fetch a post by guid
pub async fn get_post(db: &SqlitePool, guid: &str) -> Result<Option<Post>> {
    let row: Option<PostRow> = sqlx::query_as(
        "SELECT guid, profile_guid, body, created_at FROM posts WHERE guid = ?",
    )
    .bind(guid)
    .fetch_optional(db)
    .await
    .map_err(Error::Database)?;

    Ok(row.map(post_from_row))
}

/// Delete a post by guid
///
/// Returns false when no row with the given guid exists.
pub async fn delete_post(db: &SqlitePool, guid: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM posts WHERE guid = ?")
        .bind(guid)
        .execute(db)
        .await
        .map_err(Error::Database)?;

    Ok(result.rows_affected() > 0)
}

/// Count all posts
pub async fn count_posts(db: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(db)
        .await
        .map_err(Error::Database)?;

    Ok(count)
}

/// Count posts by one author
pub async fn count_posts_by_author(db: &SqlitePool, profile_guid: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE profile_guid = ?")
        .bind(profile_guid)
        .fetch_one(db)
        .await
        .map_err(Error::Database)?;

    Ok(count)
}

/// Board feed: all posts newest first, joined with author display names
pub async fn board_feed(db: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<BoardEntry>> {
    let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
        "SELECT p.guid, p.profile_guid, pr.display_name, p.body, p.created_at
         FROM posts p
         JOIN profiles pr ON pr.guid = p.profile_guid
         ORDER BY p.created_at DESC, p.rowid DESC
         LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .map_err(Error::Database)?;

    Ok(rows
        .into_iter()
        .map(|row| BoardEntry {
            post_guid: row.0,
            profile_guid: row.1,
            display_name: row.2,
            body: row.3,
            created_at: row.4,
        })
        .collect())
}

/// Posts by one author, newest first
pub async fn posts_by_author(
    db: &SqlitePool,
    profile_guid: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>> {
    let rows: Vec<PostRow> = sqlx::query_as(
        "SELECT guid, profile_guid, body, created_at
         FROM posts
         WHERE profile_guid = ?
         ORDER BY created_at DESC, rowid DESC
         LIMIT ? OFFSET ?",
    )
    .bind(profile_guid)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .map_err(Error::Database)?;

    Ok(rows.into_iter().map(post_from_row).collect())
}
