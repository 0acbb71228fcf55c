//! profile-board library
//!
//! A single-process profile board service: user profiles, a shared message
//! board, and an event stream, persisted in SQLite.

use std::time::Instant;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::events::EventBus;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod models;
pub mod pagination;

pub use error::{ApiError, ApiResult, Error, Result};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Broadcast bus for board events
    pub events: EventBus,
    /// Process start time, for /health uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, events: EventBus) -> Self {
        Self {
            db,
            events,
            started_at: Instant::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health::health_routes())
        .merge(api::buildinfo::buildinfo_routes())
        .merge(api::profiles::profile_routes())
        .merge(api::posts::post_routes())
        .merge(api::board::board_routes())
        .merge(api::settings::settings_routes())
        .merge(api::sse::sse_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
