//! Post API endpoints
//!
//! Posts are created under their author's profile and removed by guid.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::api::profiles::{parse_guid, PageQuery};
use crate::db;
use crate::events::BoardEvent;
use crate::models::Post;
use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::{ApiError, ApiResult, AppState};

/// Maximum post body length in characters
pub const MAX_POST_BODY_LEN: usize = 1000;

/// Request payload for creating a post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
}

/// Paginated posts-by-author response
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Validate a post body: non-empty after trimming, bounded length
pub fn validate_post_body(body: &str) -> ApiResult<()> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest("post body cannot be empty".to_string()));
    }
    if body.chars().count() > MAX_POST_BODY_LEN {
        return Err(ApiError::BadRequest(format!(
            "post body exceeds {} characters",
            MAX_POST_BODY_LEN
        )));
    }
    Ok(())
}

/// POST /api/profiles/:guid/posts
///
/// Creates a post authored by the given profile. 404 for an unknown
/// author, 400 for an invalid body.
pub async fn create_post(
    State(state): State<AppState>,
    Path(raw_guid): Path<String>,
    Json(payload): Json<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let profile_guid = parse_guid(&raw_guid)?;
    validate_post_body(&payload.body)?;

    // Resolve the author before inserting so an unknown profile is a clean
    // 404 rather than a foreign-key failure.
    let author = db::profiles::get_profile(&state.db, &profile_guid)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No profile with guid {}", profile_guid)))?;

    let now = chrono::Utc::now();
    let post = Post {
        guid: Uuid::new_v4().to_string(),
        profile_guid: author.guid.clone(),
        body: payload.body,
        created_at: now.to_rfc3339(),
    };

    db::posts::insert_post(&state.db, &post).await?;
    info!("Post created: {} by {}", post.guid, author.display_name);

    state.events.emit(BoardEvent::PostCreated {
        post_guid: post.guid.clone(),
        profile_guid: author.guid,
        timestamp: now,
    });

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/profiles/:guid/posts
///
/// Paginated posts by one author, newest first. 404 for an unknown author.
pub async fn list_posts_by_author(
    State(state): State<AppState>,
    Path(raw_guid): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PostListResponse>> {
    let profile_guid = parse_guid(&raw_guid)?;

    if db::profiles::get_profile(&state.db, &profile_guid).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "No profile with guid {}",
            profile_guid
        )));
    }

    let total = db::posts::count_posts_by_author(&state.db, &profile_guid).await?;
    let pagination = calculate_pagination(total, query.page.unwrap_or(1));

    let posts =
        db::posts::posts_by_author(&state.db, &profile_guid, PAGE_SIZE, pagination.offset).await?;

    Ok(Json(PostListResponse {
        posts,
        total,
        page: pagination.page,
        page_size: PAGE_SIZE,
        total_pages: pagination.total_pages,
    }))
}

/// DELETE /api/posts/:guid
pub async fn delete_post(
    State(state): State<AppState>,
    Path(raw_guid): Path<String>,
) -> ApiResult<StatusCode> {
    let guid = parse_guid(&raw_guid)?;

    let removed = db::posts::delete_post(&state.db, &guid).await?;
    if !removed {
        return Err(ApiError::NotFound(format!("No post with guid {}", guid)));
    }
    info!("Post deleted: {}", guid);

    state.events.emit(BoardEvent::PostDeleted {
        post_guid: guid,
        timestamp: chrono::Utc::now(),
    });

    Ok(StatusCode::NO_CONTENT)
}

/// Build post routes
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/profiles/:guid/posts",
            post(create_post).get(list_posts_by_author),
        )
        .route("/api/posts/:guid", delete(delete_post))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_body_empty_rejected() {
        assert!(validate_post_body("").is_err());
        assert!(validate_post_body("  \n ").is_err());
    }

    #[test]
    fn test_post_body_too_long_rejected() {
        assert!(validate_post_body(&"x".repeat(MAX_POST_BODY_LEN + 1)).is_err());
    }

    #[test]
    fn test_post_body_at_limit_accepted() {
        assert!(validate_post_body(&"x".repeat(MAX_POST_BODY_LEN)).is_ok());
        assert!(validate_post_body("hello board").is_ok());
    }
}
