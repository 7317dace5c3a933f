//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming events and forwarding room messages for the rooms
//! the connection joined.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{ClientEvent, ServerEvent};
use super::subscription::SubscriptionManager;
use crate::domain::{ConnectionId, RoomEvent};
use crate::service::RelayService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads events from the client and dispatches them to the relay.
/// - Forwards bus events for joined rooms as `receiveMessage`.
///
/// `event_rx` must be subscribed before the connection can join a room, so
/// that every message appended after a history snapshot reaches it.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<RoomEvent>,
    relay: Arc<RelayService>,
) {
    let conn_id = ConnectionId::new();
    tracing::info!(%conn_id, "user connected");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_text_message(conn_id, text.as_str(), &relay, &mut subs).await;
                        if let Some(frame) = reply
                            && ws_tx.send(Message::text(frame)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(%conn_id, error = %err, "ws receive failed");
                        break;
                    }
                    _ => {}
                }
            }
            // Message appended to some room
            event = event_rx.recv() => {
                match event {
                    Ok(room_event) => {
                        if !subs.accepts(&room_event) {
                            continue;
                        }
                        let Some(frame) = encode(conn_id, &ServerEvent::ReceiveMessage(room_event.message)) else {
                            continue;
                        };
                        if ws_tx.send(Message::text(frame)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(%conn_id, lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::info!(%conn_id, rooms = subs.count(), "user disconnected");
}

/// Handles a text frame from the client, returning an optional frame to
/// send back to this connection only.
async fn handle_text_message(
    conn_id: ConnectionId,
    text: &str,
    relay: &RelayService,
    subs: &mut SubscriptionManager,
) -> Option<String> {
    let event = match ClientEvent::parse(text) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(%conn_id, error = %err, "ignoring frame");
            return None;
        }
    };

    match event {
        ClientEvent::JoinRoom(raw_item_id) => {
            let outcome = relay.join(&raw_item_id).await;
            subs.subscribe(outcome.room.clone(), outcome.watermark());
            tracing::info!(%conn_id, room = %outcome.room, history = outcome.history.len(), "user joined room");

            if outcome.history.is_empty() {
                return None;
            }
            encode(conn_id, &ServerEvent::PreviousMessages(outcome.history))
        }
        ClientEvent::SendMessage(message) => {
            tracing::info!(%conn_id, payload = %message.as_value(), "message received");
            let sent = relay.send(message).await;
            tracing::debug!(%conn_id, seq = sent.seq, receivers = sent.receivers, "message published");
            None
        }
    }
}

fn encode(conn_id: ConnectionId, event: &ServerEvent) -> Option<String> {
    match event.to_frame() {
        Ok(frame) => Some(frame),
        Err(err) => {
            tracing::error!(%conn_id, error = %err, "failed to encode outbound frame");
            None
        }
    }
}
