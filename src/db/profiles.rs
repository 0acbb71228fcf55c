//! Profile database operations

use sqlx::SqlitePool;

use crate::models::Profile;
use crate::{Error, Result};

/// Row tuple: guid, display_name, bio, avatar_url, created_at, updated_at
type ProfileRow = (String, String, String, Option<String>, String, String);

fn profile_from_row(row: ProfileRow) -> Profile {
    Profile {
        guid: row.0,
        display_name: row.1,
        bio: row.2,
        avatar_url: row.3,
        created_at: row.4,
        updated_at: row.5,
    }
}

/// Insert a new profile
pub async fn insert_profile(db: &SqlitePool, profile: &Profile) -> Result<()> {
    sqlx::query(
        "INSERT INTO profiles (guid, display_name, bio, avatar_url, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&profile.guid)
    .bind(&profile.display_name)
    .bind(&profile.bio)
    .bind(&profile.avatar_url)
    .bind(&profile.created_at)
    .bind(&profile.updated_at)
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(())
}

/// Fetch a profile by guid
pub async fn get_profile(db: &SqlitePool, guid: &str) -> Result<Option<Profile>> {
    let row: Option<ProfileRow> = sqlx::query_as(
        "SELECT guid, display_name, bio, avatar_url, created_at, updated_at
         FROM profiles WHERE guid = ?",
    )
    .bind(guid)
    .fetch_optional(db)
    .await
    .map_err(Error::Database)?;

    Ok(row.map(profile_from_row))
}

/// List profiles, newest first
pub async fn list_profiles(db: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Profile>> {
    let rows: Vec<ProfileRow> = sqlx::query_as(
        "SELECT guid, display_name, bio, avatar_url, created_at, updated_at
         FROM profiles
         ORDER BY created_at DESC, rowid DESC
         LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .map_err(Error::Database)?;

    Ok(rows.into_iter().map(profile_from_row).collect())
}

/// Count all profiles
pub async fn count_profiles(db: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(db)
        .await
        .map_err(Error::Database)?;

    Ok(count)
}

/// Write back an updated profile
///
/// Returns false when no row with the profile's guid exists.
pub async fn update_profile(db: &SqlitePool, profile: &Profile) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE profiles
         SET display_name = ?, bio = ?, avatar_url = ?, updated_at = ?
         WHERE guid = ?",
    )
    .bind(&profile.display_name)
    .bind(&profile.bio)
    .bind(&profile.avatar_url)
    .bind(&profile.updated_at)
    .bind(&profile.guid)
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(result.rows_affected() > 0)
}

/// Delete a profile and all of its posts
///
/// Returns false when no row with the given guid exists. The post removal
/// and profile removal happen in one transaction.
pub async fn delete_profile(db: &SqlitePool, guid: &str) -> Result<bool> {
    let mut tx = db.begin().await.map_err(Error::Database)?;

    sqlx::query("DELETE FROM posts WHERE profile_guid = ?")
        .bind(guid)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

    let result = sqlx::query("DELETE FROM profiles WHERE guid = ?")
        .bind(guid)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

    tx.commit().await.map_err(Error::Database)?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_pool;

    fn sample_profile(guid: &str, name: &str) -> Profile {
        let now = chrono::Utc::now().to_rfc3339();
        Profile {
            guid: guid.to_string(),
            display_name: name.to_string(),
            bio: String::new(),
            avatar_url: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_profile() {
        let pool = init_memory_pool().await.unwrap();
        let profile = sample_profile("p1", "Ada");

        insert_profile(&pool, &profile).await.unwrap();

        let fetched = get_profile(&pool, "p1").await.unwrap().unwrap();
        assert_eq!(fetched.display_name, "Ada");
        assert_eq!(fetched.bio, "");
        assert_eq!(fetched.avatar_url, None);
    }

    #[tokio::test]
    async fn test_get_missing_profile_returns_none() {
        let pool = init_memory_pool().await.unwrap();

        let fetched = get_profile(&pool, "nope").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_list_profiles_newest_first() {
        let pool = init_memory_pool().await.unwrap();

        for i in 1..=3 {
            insert_profile(&pool, &sample_profile(&format!("p{}", i), &format!("User {}", i)))
                .await
                .unwrap();
        }

        let profiles = list_profiles(&pool, 10, 0).await.unwrap();
        assert_eq!(profiles.len(), 3);
        // Same created_at second is possible; rowid breaks the tie newest-first
        assert_eq!(profiles[0].guid, "p3");
        assert_eq!(profiles[2].guid, "p1");

        assert_eq!(count_profiles(&pool).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_profiles_respects_limit_and_offset() {
        let pool = init_memory_pool().await.unwrap();

        for i in 1..=5 {
            insert_profile(&pool, &sample_profile(&format!("p{}", i), "x"))
                .await
                .unwrap();
        }

        let page = list_profiles(&pool, 2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].guid, "p3");
        assert_eq!(page[1].guid, "p2");
    }

    #[tokio::test]
    async fn test_update_profile() {
        let pool = init_memory_pool().await.unwrap();
        let mut profile = sample_profile("p1", "Ada");
        insert_profile(&pool, &profile).await.unwrap();

        profile.display_name = "Ada L.".to_string();
        profile.bio = "mathematician".to_string();
        profile.avatar_url = Some("https://example.com/ada.png".to_string());
        let updated = update_profile(&pool, &profile).await.unwrap();
        assert!(updated);

        let fetched = get_profile(&pool, "p1").await.unwrap().unwrap();
        assert_eq!(fetched.display_name, "Ada L.");
        assert_eq!(fetched.bio, "mathematician");
        assert_eq!(
            fetched.avatar_url.as_deref(),
            Some("https://example.com/ada.png")
        );
    }

    #[tokio::test]
    async fn test_update_missing_profile_returns_false() {
        let pool = init_memory_pool().await.unwrap();
        let profile = sample_profile("ghost", "Nobody");

        let updated = update_profile(&pool, &profile).await.unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_delete_profile_removes_posts() {
        let pool = init_memory_pool().await.unwrap();
        let profile = sample_profile("p1", "Ada");
        insert_profile(&pool, &profile).await.unwrap();

        let post = crate::models::Post {
            guid: "m1".to_string(),
            profile_guid: "p1".to_string(),
            body: "hello board".to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        crate::db::posts::insert_post(&pool, &post).await.unwrap();

        let removed = delete_profile(&pool, "p1").await.unwrap();
        assert!(removed);

        assert!(get_profile(&pool, "p1").await.unwrap().is_none());
        assert_eq!(crate::db::posts::count_posts(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_profile_returns_false() {
        let pool = init_memory_pool().await.unwrap();

        let removed = delete_profile(&pool, "nope").await.unwrap();
        assert!(!removed);
    }
}
