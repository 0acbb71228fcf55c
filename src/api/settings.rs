//! Settings API endpoints
//!
//! Exposes the board title stored in the settings table.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db;
use crate::{ApiError, ApiResult, AppState};

/// Maximum board title length in characters
pub const MAX_BOARD_TITLE_LEN: usize = 200;

/// Board title response
#[derive(Debug, Serialize)]
pub struct BoardTitleResponse {
    pub board_title: String,
}

/// Request payload for setting the board title
#[derive(Debug, Deserialize)]
pub struct SetBoardTitleRequest {
    pub board_title: String,
}

/// Response payload for board title configuration
#[derive(Debug, Serialize)]
pub struct SetBoardTitleResponse {
    pub success: bool,
    pub message: String,
}

/// GET /api/settings/board_title
pub async fn get_board_title(State(state): State<AppState>) -> ApiResult<Json<BoardTitleResponse>> {
    let board_title = db::settings::get_board_title(&state.db).await?;
    Ok(Json(BoardTitleResponse { board_title }))
}

/// PUT /api/settings/board_title
///
/// **Errors:**
/// - 400 Bad Request: empty or over-long title
/// - 500 Internal Server Error: database write failure
pub async fn set_board_title(
    State(state): State<AppState>,
    Json(payload): Json<SetBoardTitleRequest>,
) -> ApiResult<Json<SetBoardTitleResponse>> {
    let title = payload.board_title;
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "board_title cannot be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_BOARD_TITLE_LEN {
        return Err(ApiError::BadRequest(format!(
            "board_title exceeds {} characters",
            MAX_BOARD_TITLE_LEN
        )));
    }

    db::settings::set_board_title(&state.db, title).await?;
    info!("Board title updated");

    Ok(Json(SetBoardTitleResponse {
        success: true,
        message: "Board title updated".to_string(),
    }))
}

/// Build settings routes
pub fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/api/settings/board_title",
        get(get_board_title).put(set_board_title),
    )
}
