//! Domain layer: room keys, messages, history and the event system.
//!
//! This module contains the server-side model: canonical room keys,
//! connection identity, the append-only history store, and the event bus
//! that fans room messages out to connections.

pub mod chat_message;
pub mod connection_id;
pub mod event_bus;
pub mod history_store;
pub mod room_event;
pub mod room_key;

pub use chat_message::ChatMessage;
pub use connection_id::ConnectionId;
pub use event_bus::EventBus;
pub use history_store::HistoryStore;
pub use room_event::RoomEvent;
pub use room_key::RoomKey;
