//! WebSocket frame types: named events with a JSON payload.
//!
//! Every text frame is `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ChatMessage;
use crate::error::RelayError;

/// Inbound event name: join a room.
pub const JOIN_ROOM: &str = "joinRoom";
/// Inbound event name: send a message to a room.
pub const SEND_MESSAGE: &str = "sendMessage";

/// Raw inbound envelope before dispatch on the event name.
#[derive(Debug, Deserialize)]
struct RawFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Events a client can send.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Join the room of the given item identifier (any JSON value).
    JoinRoom(Value),
    /// Send a message; routed by its `itemId`.
    SendMessage(ChatMessage),
}

impl ClientEvent {
    /// Decodes a text frame.
    ///
    /// A missing `data` field is read as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedFrame`] if the frame is not a JSON
    /// object with a string `event`, and [`RelayError::UnknownEvent`] for
    /// any event name other than `joinRoom` and `sendMessage`.
    pub fn parse(text: &str) -> Result<Self, RelayError> {
        let frame: RawFrame = serde_json::from_str(text)?;
        match frame.event.as_str() {
            JOIN_ROOM => Ok(Self::JoinRoom(frame.data)),
            SEND_MESSAGE => Ok(Self::SendMessage(ChatMessage::new(frame.data))),
            _ => Err(RelayError::UnknownEvent(frame.event)),
        }
    }
}

/// Events the relay sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Full ordered history of a room, sent once to a joining connection.
    PreviousMessages(Vec<ChatMessage>),
    /// A message just sent to a room the connection is subscribed to.
    ReceiveMessage(ChatMessage),
}

impl ServerEvent {
    /// Encodes the event as a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedFrame`] if the payload cannot be
    /// serialized.
    pub fn to_frame(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}
