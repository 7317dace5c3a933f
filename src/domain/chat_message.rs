//! Chat message record.
//!
//! A [`ChatMessage`] is kept exactly as the client sent it. The relay reads
//! `itemId` to find the room and never interprets the other fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RoomKey;

/// One message sent to a room: `{ itemId, senderId, text, timestamp }`.
///
/// The payload is passed through untouched, including any extra or missing
/// fields. Once stored in a room's history it is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatMessage(Value);

impl ChatMessage {
    /// Wraps a raw payload received from a client.
    #[must_use]
    pub const fn new(payload: Value) -> Self {
        Self(payload)
    }

    /// Raw `itemId` field, or `null` when absent.
    #[must_use]
    pub fn item_id(&self) -> &Value {
        self.field("itemId")
    }

    /// Raw `senderId` field, or `null` when absent.
    #[must_use]
    pub fn sender_id(&self) -> &Value {
        self.field("senderId")
    }

    /// Raw `text` field, or `null` when absent.
    #[must_use]
    pub fn text(&self) -> &Value {
        self.field("text")
    }

    /// Raw `timestamp` field, or `null` when absent.
    #[must_use]
    pub fn timestamp(&self) -> &Value {
        self.field("timestamp")
    }

    /// Room this message belongs to.
    #[must_use]
    pub fn room_key(&self) -> RoomKey {
        RoomKey::normalize(self.item_id())
    }

    /// Returns the underlying payload.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    fn field(&self, name: &str) -> &Value {
        self.0.get(name).unwrap_or(&Value::Null)
    }
}

impl From<Value> for ChatMessage {
    fn from(payload: Value) -> Self {
        Self(payload)
    }
}
