//! Profile API endpoints
//!
//! CRUD over profiles. Listing is paginated newest-first.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::events::BoardEvent;
use crate::models::Profile;
use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::{ApiError, ApiResult, AppState};

/// Maximum display name length in characters
pub const MAX_DISPLAY_NAME_LEN: usize = 120;

/// Maximum bio length in characters
pub const MAX_BIO_LEN: usize = 2000;

/// Request payload for creating a profile
#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    pub avatar_url: Option<String>,
}

/// Request payload for updating a profile; absent fields are kept
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// Paginated profile list response
#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<Profile>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Validate a display name: non-empty after trimming, bounded length
pub fn validate_display_name(name: &str) -> ApiResult<()> {
    if name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "display_name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(ApiError::BadRequest(format!(
            "display_name exceeds {} characters",
            MAX_DISPLAY_NAME_LEN
        )));
    }
    Ok(())
}

/// Validate a bio: bounded length, empty allowed
pub fn validate_bio(bio: &str) -> ApiResult<()> {
    if bio.chars().count() > MAX_BIO_LEN {
        return Err(ApiError::BadRequest(format!(
            "bio exceeds {} characters",
            MAX_BIO_LEN
        )));
    }
    Ok(())
}

/// Validate an avatar URL: must be http(s)
pub fn validate_avatar_url(url: &str) -> ApiResult<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ApiError::BadRequest(
            "avatar_url must be an http(s) URL".to_string(),
        ));
    }
    Ok(())
}

/// Parse a guid path segment, normalizing to canonical lowercase form
pub fn parse_guid(raw: &str) -> ApiResult<String> {
    Uuid::parse_str(raw)
        .map(|u| u.to_string())
        .map_err(|_| ApiError::BadRequest(format!("Invalid guid: {}", raw)))
}

/// POST /api/profiles
///
/// Creates a profile. 201 with the created profile, 400 on validation
/// failure.
pub async fn create_profile(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfileRequest>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    validate_display_name(&payload.display_name)?;
    validate_bio(&payload.bio)?;
    if let Some(url) = &payload.avatar_url {
        validate_avatar_url(url)?;
    }

    let now = chrono::Utc::now();
    let profile = Profile {
        guid: Uuid::new_v4().to_string(),
        display_name: payload.display_name,
        bio: payload.bio,
        avatar_url: payload.avatar_url,
        created_at: now.to_rfc3339(),
        updated_at: now.to_rfc3339(),
    };

    db::profiles::insert_profile(&state.db, &profile).await?;
    info!("Profile created: {} ({})", profile.display_name, profile.guid);

    state.events.emit(BoardEvent::ProfileCreated {
        profile_guid: profile.guid.clone(),
        display_name: profile.display_name.clone(),
        timestamp: now,
    });

    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/profiles
///
/// Paginated list, newest first. Out-of-range pages are clamped.
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<ProfileListResponse>> {
    let total = db::profiles::count_profiles(&state.db).await?;
    let pagination = calculate_pagination(total, query.page.unwrap_or(1));

    let profiles = db::profiles::list_profiles(&state.db, PAGE_SIZE, pagination.offset).await?;

    Ok(Json(ProfileListResponse {
        profiles,
        total,
        page: pagination.page,
        page_size: PAGE_SIZE,
        total_pages: pagination.total_pages,
    }))
}

/// GET /api/profiles/:guid
pub async fn get_profile(
    State(state): State<AppState>,
    Path(raw_guid): Path<String>,
) -> ApiResult<Json<Profile>> {
    let guid = parse_guid(&raw_guid)?;

    let profile = db::profiles::get_profile(&state.db, &guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No profile with guid {}", guid)))?;

    Ok(Json(profile))
}

/// PUT /api/profiles/:guid
///
/// Partial update: absent fields keep their current values.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(raw_guid): Path<String>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Json<Profile>> {
    let guid = parse_guid(&raw_guid)?;

    let mut profile = db::profiles::get_profile(&state.db, &guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No profile with guid {}", guid)))?;

    if let Some(display_name) = payload.display_name {
        validate_display_name(&display_name)?;
        profile.display_name = display_name;
    }
    if let Some(bio) = payload.bio {
        validate_bio(&bio)?;
        profile.bio = bio;
    }
    if let Some(url) = payload.avatar_url {
        validate_avatar_url(&url)?;
        profile.avatar_url = Some(url);
    }

    let now = chrono::Utc::now();
    profile.updated_at = now.to_rfc3339();

    let updated = db::profiles::update_profile(&state.db, &profile).await?;
    if !updated {
        return Err(ApiError::NotFound(format!("No profile with guid {}", guid)));
    }

    state.events.emit(BoardEvent::ProfileUpdated {
        profile_guid: profile.guid.clone(),
        timestamp: now,
    });

    Ok(Json(profile))
}

/// DELETE /api/profiles/:guid
///
/// Removes the profile and all of its posts. 204 on success.
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(raw_guid): Path<String>,
) -> ApiResult<StatusCode> {
    let guid = parse_guid(&raw_guid)?;

    let removed = db::profiles::delete_profile(&state.db, &guid).await?;
    if !removed {
        return Err(ApiError::NotFound(format!("No profile with guid {}", guid)));
    }
    info!("Profile deleted: {}", guid);

    state.events.emit(BoardEvent::ProfileDeleted {
        profile_guid: guid,
        timestamp: chrono::Utc::now(),
    });

    Ok(StatusCode::NO_CONTENT)
}

/// Build profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/api/profiles", post(create_profile).get(list_profiles))
        .route(
            "/api/profiles/:guid",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_empty_rejected() {
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("   ").is_err());
    }

    #[test]
    fn test_display_name_too_long_rejected() {
        let long = "x".repeat(MAX_DISPLAY_NAME_LEN + 1);
        assert!(validate_display_name(&long).is_err());
    }

    #[test]
    fn test_display_name_at_limit_accepted() {
        let max = "x".repeat(MAX_DISPLAY_NAME_LEN);
        assert!(validate_display_name(&max).is_ok());
        assert!(validate_display_name("Ada Lovelace").is_ok());
    }

    #[test]
    fn test_bio_limits() {
        assert!(validate_bio("").is_ok());
        assert!(validate_bio(&"b".repeat(MAX_BIO_LEN)).is_ok());
        assert!(validate_bio(&"b".repeat(MAX_BIO_LEN + 1)).is_err());
    }

    #[test]
    fn test_avatar_url_scheme() {
        assert!(validate_avatar_url("https://example.com/a.png").is_ok());
        assert!(validate_avatar_url("http://example.com/a.png").is_ok());
        assert!(validate_avatar_url("ftp://example.com/a.png").is_err());
        assert!(validate_avatar_url("example.com/a.png").is_err());
    }

    #[test]
    fn test_parse_guid_normalizes_case() {
        let guid = parse_guid("9B2C1A04-9C1E-4F7A-8D6B-0C2E1F3A4B5C").unwrap();
        assert_eq!(guid, "9b2c1a04-9c1e-4f7a-8d6b-0c2e1f3a4b5c");
    }

    #[test]
    fn test_parse_guid_rejects_garbage() {
        assert!(parse_guid("not-a-uuid").is_err());
        assert!(parse_guid("").is_err());
    }
}
