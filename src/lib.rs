//! # room-relay
//!
//! Real-time chat relay keyed by item identifier.
//!
//! Clients attach over WebSocket, join the room of an item, exchange
//! messages inside that room, and receive every message previously sent to
//! it when they join. Rooms are independent and live only as long as the
//! process.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, HTTP)
//!     │
//!     ├── WS Handler (ws/)         joinRoom / sendMessage
//!     ├── System routes (api/)     GET / and GET /health
//!     │
//!     ├── RelayService (service/)
//!     │
//!     ├── HistoryStore (domain/)   per-room append-only log
//!     └── EventBus (domain/)       fan-out to subscribed connections
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
