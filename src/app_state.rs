//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::RelayService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Relay service owning the room history.
    pub relay: Arc<RelayService>,
    /// Event bus for WebSocket room subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds a fresh state with an empty history and a bus of the given
    /// capacity.
    #[must_use]
    pub fn new(event_bus_capacity: usize) -> Self {
        let event_bus = EventBus::new(event_bus_capacity);
        let relay = Arc::new(RelayService::new(event_bus.clone()));
        Self { relay, event_bus }
    }
}
