//! Event types and broadcast bus for profile-board
//!
//! Events are broadcast via [`EventBus`] and serialized for SSE transmission.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Board event types
///
/// Emitted by API handlers after a successful mutation and forwarded to
/// connected SSE clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BoardEvent {
    /// A new profile was created
    ProfileCreated {
        profile_guid: String,
        display_name: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// An existing profile was updated
    ProfileUpdated {
        profile_guid: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A profile was deleted (its posts are removed with it)
    ProfileDeleted {
        profile_guid: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A post was added to the board
    PostCreated {
        post_guid: String,
        profile_guid: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A post was removed from the board
    PostDeleted {
        post_guid: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Central event distribution bus
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
/// - Lagged message detection for slow subscribers
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<BoardEvent>,
}

impl EventBus {
    /// Creates a new EventBus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Having no subscribers is not an error condition for the publisher;
    /// the event is simply dropped.
    pub fn emit(&self, event: BoardEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("Event emitted with no subscribers: {}", e);
        }
    }
}
