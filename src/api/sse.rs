//! Server-Sent Events endpoint
//!
//! Bridges the broadcast event bus to connected clients. Each client gets
//! an initial connection status event, then every board event as JSON.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{extract::State, routing::get, Router};
use futures::stream::Stream;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::AppState;

/// GET /api/events
///
/// SSE stream of board events. Lagged subscribers skip missed events
/// instead of tearing down the stream.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.events.subscribe();
    info!("New SSE client connected");

    let stream = async_stream::stream! {
        // Initial connected status
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        debug!("SSE: forwarding event");
                        yield Ok(Event::default().event("BoardEvent").data(json));
                    }
                    Err(e) => {
                        warn!("SSE: failed to serialize event: {}", e);
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!("SSE subscriber lagged, skipped {} events", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}

/// Build SSE routes
pub fn sse_routes() -> Router<AppState> {
    Router::new().route("/api/events", get(event_stream))
}
