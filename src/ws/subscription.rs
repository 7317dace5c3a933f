//! Per-connection room subscriptions.
//!
//! Tracks which rooms a WebSocket client joined and provides server-side
//! filtering of bus events.

use std::collections::HashMap;

use crate::domain::{RoomEvent, RoomKey};

/// Manages the set of joined rooms for a single WebSocket connection.
///
/// Each room carries a watermark: bus events with a lower sequence number
/// were already part of the history snapshot sent on join and are skipped.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    rooms: HashMap<RoomKey, usize>,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to `room`, delivering events from `watermark` onwards.
    ///
    /// Joining an already joined room only moves the watermark forward, so
    /// no message is ever delivered twice.
    pub fn subscribe(&mut self, room: RoomKey, watermark: usize) {
        let entry = self.rooms.entry(room).or_insert(watermark);
        *entry = (*entry).max(watermark);
    }

    /// Returns `true` if the event belongs to a joined room and was not
    /// already covered by that room's history snapshot.
    #[must_use]
    pub fn accepts(&self, event: &RoomEvent) -> bool {
        self.rooms
            .get(&event.room)
            .is_some_and(|watermark| event.seq >= *watermark)
    }

    /// Returns `true` if the connection joined `room`.
    #[must_use]
    pub fn is_subscribed(&self, room: &RoomKey) -> bool {
        self.rooms.contains_key(room)
    }

    /// Returns the number of joined rooms.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rooms.len()
    }
}
