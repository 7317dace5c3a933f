//! Per-room message history.
//!
//! [`HistoryStore`] keeps every message sent to a room since process start,
//! in send order. Nothing is ever evicted. The store itself is not
//! synchronized; [`crate::service::RelayService`] owns it behind a lock so
//! that appends and broadcasts happen in one step.

use std::collections::HashMap;

use super::{ChatMessage, RoomKey};

/// Append-only message log keyed by room.
#[derive(Debug, Default)]
pub struct HistoryStore {
    rooms: HashMap<RoomKey, Vec<ChatMessage>>,
    total: usize,
}

impl HistoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to the room's history, creating it on first use.
    ///
    /// Returns the zero-based position of the new message in that room.
    pub fn append(&mut self, room: RoomKey, message: ChatMessage) -> usize {
        let entries = self.rooms.entry(room).or_default();
        let seq = entries.len();
        entries.push(message);
        self.total = self.total.saturating_add(1);
        seq
    }

    /// Returns the full ordered history of a room, or `None` if nothing was
    /// ever sent there.
    #[must_use]
    pub fn get(&self, room: &RoomKey) -> Option<&[ChatMessage]> {
        self.rooms.get(room).map(Vec::as_slice)
    }

    /// Number of messages stored for a room.
    #[must_use]
    pub fn len(&self, room: &RoomKey) -> usize {
        self.rooms.get(room).map_or(0, Vec::len)
    }

    /// Number of rooms with at least one message.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of messages across all rooms.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.total
    }

    /// Returns `true` if no message was stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
