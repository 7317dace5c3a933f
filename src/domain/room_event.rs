//! Bus event published for every message appended to a room.

use super::{ChatMessage, RoomKey};

/// A message fanned out to every connection subscribed to `room`.
///
/// `seq` is the message's zero-based position in the room's history, so a
/// connection can tell whether it already received the message as part of
/// a history snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomEvent {
    /// Room the message was sent to.
    pub room: RoomKey,
    /// Position of the message in the room's history.
    pub seq: usize,
    /// The message, exactly as stored.
    pub message: ChatMessage,
}
