//! Relay service: joins rooms, stores messages and emits room events.

use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::{ChatMessage, EventBus, HistoryStore, RoomEvent, RoomKey};

/// Result of joining a room.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    /// Canonical key of the joined room.
    pub room: RoomKey,
    /// Snapshot of the room's history at join time, oldest first.
    pub history: Vec<ChatMessage>,
}

impl JoinOutcome {
    /// Sequence number of the first message not covered by
    /// [`Self::history`]. Bus events below it must not be re-delivered.
    #[must_use]
    pub fn watermark(&self) -> usize {
        self.history.len()
    }
}

/// Result of sending a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOutcome {
    /// Position of the message in its room's history.
    pub seq: usize,
    /// Number of bus receivers the event reached.
    pub receivers: usize,
}

/// Point-in-time counters for the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    /// Rooms with at least one stored message.
    pub rooms: usize,
    /// Messages stored across all rooms.
    pub messages: usize,
    /// Currently attached connections.
    pub connections: usize,
}

/// Orchestration layer for the relay protocol.
///
/// Owns the [`HistoryStore`] behind a single lock and the [`EventBus`]
/// used for fan-out. A send holds the write lock across append and
/// publish, so every receiver observes a room's messages in history order.
/// A join holds the read lock while taking its snapshot, so the snapshot
/// and the bus never disagree about which messages came first.
#[derive(Debug)]
pub struct RelayService {
    history: RwLock<HistoryStore>,
    event_bus: EventBus,
}

impl RelayService {
    /// Creates a service with an empty history.
    #[must_use]
    pub fn new(event_bus: EventBus) -> Self {
        Self::with_history(HistoryStore::new(), event_bus)
    }

    /// Creates a service around an existing history store.
    #[must_use]
    pub fn with_history(history: HistoryStore, event_bus: EventBus) -> Self {
        Self {
            history: RwLock::new(history),
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Resolves the room for `raw_item_id` and snapshots its history.
    ///
    /// Any value is accepted; it is normalized with [`RoomKey::normalize`].
    /// The returned history is empty when nothing was sent to the room yet.
    pub async fn join(&self, raw_item_id: &Value) -> JoinOutcome {
        let room = RoomKey::normalize(raw_item_id);
        let history = {
            let store = self.history.read().await;
            store.get(&room).map(<[ChatMessage]>::to_vec).unwrap_or_default()
        };
        JoinOutcome { room, history }
    }

    /// Appends `message` to its room and broadcasts it to the room's
    /// subscribers, sender included.
    pub async fn send(&self, message: ChatMessage) -> SendOutcome {
        let room = message.room_key();
        let mut store = self.history.write().await;
        let seq = store.append(room.clone(), message.clone());
        let receivers = self.event_bus.publish(RoomEvent { room, seq, message });
        drop(store);
        SendOutcome { seq, receivers }
    }

    /// Returns a copy of a room's stored history, oldest first.
    pub async fn history(&self, room: &RoomKey) -> Option<Vec<ChatMessage>> {
        self.history.read().await.get(room).map(<[ChatMessage]>::to_vec)
    }

    /// Returns current room, message and connection counts.
    pub async fn stats(&self) -> RelayStats {
        let store = self.history.read().await;
        RelayStats {
            rooms: store.room_count(),
            messages: store.message_count(),
            connections: self.event_bus.receiver_count(),
        }
    }
}
