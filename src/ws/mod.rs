//! WebSocket layer: connection handling, event routing, room subscriptions.
//!
//! The WebSocket endpoint at `/ws` carries `joinRoom` / `sendMessage`
//! from clients and `previousMessages` / `receiveMessage` back to them.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
