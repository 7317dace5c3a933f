//! End-to-end relay tests against a live server on a random local port.

#![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used, missing_docs)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use room_relay::api::build_app;
use room_relay::app_state::AppState;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = build_app(AppState::new(1024));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

async fn connect(addr: SocketAddr) -> Client {
    let (ws, _) = connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("ws connect");
    ws
}

async fn emit(ws: &mut Client, event: &str, data: Value) {
    let frame = json!({ "event": event, "data": data }).to_string();
    ws.send(Message::text(frame)).await.expect("ws send");
}

async fn next_event(ws: &mut Client) -> (String, Value) {
    loop {
        let msg = tokio::time::timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("timed out waiting for event")
            .expect("stream ended")
            .expect("ws error");
        if let Message::Text(text) = msg {
            let frame: Value = serde_json::from_str(text.as_str()).expect("json frame");
            let event = frame
                .get("event")
                .and_then(Value::as_str)
                .expect("event name")
                .to_string();
            let data = frame.get("data").cloned().unwrap_or(Value::Null);
            return (event, data);
        }
    }
}

fn chat(item_id: Value, sender: &str, text: &str, timestamp: u64) -> Value {
    json!({ "itemId": item_id, "senderId": sender, "text": text, "timestamp": timestamp })
}

/// Sends `message` and waits for the sender's own echo, which proves the
/// connection has finished handling every earlier frame.
async fn send_and_echo(ws: &mut Client, message: Value) {
    emit(ws, "sendMessage", message.clone()).await;
    assert_eq!(next_event(ws).await, ("receiveMessage".to_string(), message));
}

/// Waits until the server has handled every frame this connection sent so
/// far, using a fresh private room so no history is replayed.
async fn barrier(ws: &mut Client) {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    let room = format!("barrier-{}", NEXT.fetch_add(1, Ordering::Relaxed));
    emit(ws, "joinRoom", json!(room)).await;
    send_and_echo(ws, chat(json!(room), "barrier", "", 0)).await;
}

#[tokio::test]
async fn item_42_scenario() {
    let addr = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;

    emit(&mut a, "joinRoom", json!("42")).await;
    let first = chat(json!("42"), "u1", "hi", 1000);
    send_and_echo(&mut a, first.clone()).await;

    emit(&mut b, "joinRoom", json!("42")).await;
    assert_eq!(
        next_event(&mut b).await,
        ("previousMessages".to_string(), json!([first]))
    );

    let second = chat(json!("42"), "u1", "still there?", 2000);
    emit(&mut a, "sendMessage", second.clone()).await;
    assert_eq!(
        next_event(&mut a).await,
        ("receiveMessage".to_string(), second.clone())
    );
    assert_eq!(
        next_event(&mut b).await,
        ("receiveMessage".to_string(), second)
    );
}

#[tokio::test]
async fn joining_empty_room_sends_no_history() {
    let addr = spawn_server().await;
    let mut a = connect(addr).await;

    emit(&mut a, "joinRoom", json!("empty")).await;
    let msg = chat(json!("empty"), "u1", "first", 1);
    emit(&mut a, "sendMessage", msg.clone()).await;

    // Frames are handled in order, so a history event would come first.
    assert_eq!(next_event(&mut a).await, ("receiveMessage".to_string(), msg));
}

#[tokio::test]
async fn late_joiner_sees_history_in_send_order() {
    let addr = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    emit(&mut a, "joinRoom", json!("ordered")).await;
    emit(&mut b, "joinRoom", json!("ordered")).await;
    barrier(&mut b).await;

    let mut sent = Vec::new();
    for i in 0..6u64 {
        let (sender, name) = if i % 2 == 0 { (&mut a, "u1") } else { (&mut b, "u2") };
        let msg = chat(json!("ordered"), name, &format!("m{i}"), i);
        emit(sender, "sendMessage", msg.clone()).await;
        // Both subscribers observe the same message before the next send.
        assert_eq!(next_event(&mut a).await.1, msg);
        assert_eq!(next_event(&mut b).await.1, msg);
        sent.push(msg);
    }

    let mut late = connect(addr).await;
    emit(&mut late, "joinRoom", json!("ordered")).await;
    assert_eq!(
        next_event(&mut late).await,
        ("previousMessages".to_string(), Value::Array(sent))
    );
}

#[tokio::test]
async fn rooms_are_isolated() {
    let addr = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;

    emit(&mut a, "joinRoom", json!("r1")).await;
    emit(&mut b, "joinRoom", json!("r2")).await;
    send_and_echo(&mut b, chat(json!("r2"), "u2", "sync", 1)).await;

    send_and_echo(&mut a, chat(json!("r1"), "u1", "only r1", 2)).await;

    let own = chat(json!("r2"), "u2", "only r2", 3);
    emit(&mut b, "sendMessage", own.clone()).await;
    assert_eq!(next_event(&mut b).await, ("receiveMessage".to_string(), own));
}

#[tokio::test]
async fn joining_twice_does_not_duplicate_delivery() {
    let addr = spawn_server().await;
    let mut a = connect(addr).await;

    emit(&mut a, "joinRoom", json!("dup")).await;
    emit(&mut a, "joinRoom", json!("dup")).await;

    let first = chat(json!("dup"), "u1", "one", 1);
    send_and_echo(&mut a, first.clone()).await;
    let second = chat(json!("dup"), "u1", "two", 2);
    send_and_echo(&mut a, second.clone()).await;

    // Rejoining replays history but never a second live copy.
    emit(&mut a, "joinRoom", json!("dup")).await;
    assert_eq!(
        next_event(&mut a).await,
        ("previousMessages".to_string(), json!([first, second]))
    );
    let third = chat(json!("dup"), "u1", "three", 3);
    send_and_echo(&mut a, third).await;
}

#[tokio::test]
async fn numeric_and_string_item_ids_share_a_room() {
    let addr = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;

    emit(&mut a, "joinRoom", json!(42)).await;
    send_and_echo(&mut a, chat(json!(42), "u1", "numeric", 1)).await;

    emit(&mut b, "joinRoom", json!("42")).await;
    let (event, history) = next_event(&mut b).await;
    assert_eq!(event, "previousMessages");
    assert_eq!(history, json!([chat(json!(42), "u1", "numeric", 1)]));

    let from_b = chat(json!("42"), "u2", "string", 2);
    emit(&mut b, "sendMessage", from_b.clone()).await;
    assert_eq!(next_event(&mut a).await.1, from_b);
}

#[tokio::test]
async fn malformed_and_unknown_frames_are_ignored() {
    let addr = spawn_server().await;
    let mut a = connect(addr).await;

    a.send(Message::text("not json")).await.expect("send");
    emit(&mut a, "typing", json!({"itemId": "x"})).await;
    emit(&mut a, "joinRoom", json!("x")).await;

    send_and_echo(&mut a, chat(json!("x"), "u1", "still alive", 1)).await;
}

#[tokio::test]
async fn root_endpoint_returns_status_string() {
    let addr = spawn_server().await;
    let response = reqwest::get(format!("http://{addr}/"))
        .await
        .expect("http get");
    assert!(response.status().is_success());
    let body = response.text().await.expect("body");
    assert_eq!(body, room_relay::api::handlers::system::STATUS_MESSAGE);
}

#[tokio::test]
async fn health_counts_rooms_and_messages() {
    let addr = spawn_server().await;
    let mut a = connect(addr).await;
    emit(&mut a, "joinRoom", json!("h")).await;
    send_and_echo(&mut a, chat(json!("h"), "u1", "x", 1)).await;
    // Not joined to "other": no echo, but the message is still stored.
    emit(&mut a, "sendMessage", chat(json!("other"), "u1", "y", 2)).await;
    send_and_echo(&mut a, chat(json!("h"), "u1", "z", 3)).await;

    let health: Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("http get")
        .json()
        .await
        .expect("json body");
    assert_eq!(health.get("rooms"), Some(&json!(2)));
    assert_eq!(health.get("messages"), Some(&json!(3)));
    assert_eq!(health.get("connections"), Some(&json!(1)));
}
