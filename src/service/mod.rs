//! Service layer: relay protocol orchestration.
//!
//! [`RelayService`] resolves rooms, stores messages in the
//! [`super::domain::HistoryStore`] and emits events through the
//! [`super::domain::EventBus`].

pub mod relay_service;

pub use relay_service::{JoinOutcome, RelayService, RelayStats, SendOutcome};
