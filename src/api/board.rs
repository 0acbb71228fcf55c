//! Board feed endpoint
//!
//! The board is the reverse-chronological feed of all posts, each joined
//! with its author's display name.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::profiles::PageQuery;
use crate::db;
use crate::models::BoardEntry;
use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::{ApiResult, AppState};

/// Paginated board feed response
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub entries: Vec<BoardEntry>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// GET /api/board
///
/// Paginated feed of all posts, newest first. Out-of-range pages are
/// clamped.
pub async fn get_board(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<BoardResponse>> {
    let total = db::posts::count_posts(&state.db).await?;
    let pagination = calculate_pagination(total, query.page.unwrap_or(1));

    let entries = db::posts::board_feed(&state.db, PAGE_SIZE, pagination.offset).await?;

    Ok(Json(BoardResponse {
        entries,
        total,
        page: pagination.page,
        page_size: PAGE_SIZE,
        total_pages: pagination.total_pages,
    }))
}

/// Build board routes
pub fn board_routes() -> Router<AppState> {
    Router::new().route("/api/board", get(get_board))
}
