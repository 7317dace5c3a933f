//! Broadcast channel for room events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every message
//! appended to a room is published as a [`RoomEvent`], and every WebSocket
//! connection holds a receiver which it filters by its own room
//! subscriptions.

use tokio::sync::broadcast;

use super::RoomEvent;

/// Broadcast bus for [`RoomEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity
/// (default 10 000). When the ring buffer is full, the oldest events are
/// dropped for lagging receivers. All receivers observe events in the
/// order they were published.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<RoomEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    ///
    /// A capacity of zero is bumped to one, since `tokio` rejects empty
    /// channels.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all receivers.
    ///
    /// Returns the number of receivers that got the event. With no active
    /// receivers the event is silently dropped.
    pub fn publish(&self, event: RoomEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will see all future events.
    ///
    /// Each WebSocket connection calls this once, before it can join any
    /// room.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RoomEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
