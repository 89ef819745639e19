//! Append-only event store boundary.
//!
//! Streams are addressed by name (e.g. `editingsession:<id>`); the store makes
//! no assumption about what the payloads mean.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryEventStore;
pub use r#trait::{EventStore, EventStoreError, StoredEvent, UncommittedEvent};

use std::sync::Mutex;

use serde_json::Value as JsonValue;
use tracing::warn;

use contentrepo_core::{ExpectedVersion, StreamName};
use contentrepo_events::{EventBus, EventEnvelope};

/// Adapter that publishes committed events to an `EventBus` after a successful append.
///
/// - publish happens only after append succeeds
/// - the stream is the source of truth: once the append has committed, the
///   append is reported as successful even if the bus rejects an envelope
/// - append + fan-out run under one lock, so envelopes of concurrent appends
///   reach subscribers in stream order
pub struct PublishingEventStore<S, B> {
    store: S,
    bus: B,
    fan_out: Mutex<()>,
}

impl<S, B> PublishingEventStore<S, B> {
    pub fn new(store: S, bus: B) -> Self {
        Self {
            store,
            bus,
            fan_out: Mutex::new(()),
        }
    }
}

impl<S, B> EventStore for PublishingEventStore<S, B>
where
    S: EventStore,
    B: EventBus<EventEnvelope<JsonValue>>,
{
    fn append(
        &self,
        stream: &StreamName,
        events: Vec<UncommittedEvent>,
        expected_version: ExpectedVersion,
    ) -> Result<Vec<StoredEvent>, EventStoreError> {
        let _fan_out = self
            .fan_out
            .lock()
            .map_err(|_| EventStoreError::Unavailable("fan-out lock poisoned".to_string()))?;

        let committed = self.store.append(stream, events, expected_version)?;

        for (published, e) in committed.iter().enumerate() {
            if let Err(err) = self.bus.publish(e.to_envelope()) {
                warn!(
                    stream = %stream,
                    sequence_number = e.sequence_number,
                    published,
                    committed = committed.len(),
                    "committed events not delivered to the bus: {err:?}"
                );
                break;
            }
        }

        Ok(committed)
    }

    fn load_stream(&self, stream: &StreamName) -> Result<Vec<StoredEvent>, EventStoreError> {
        self.store.load_stream(stream)
    }

    fn stream_version(&self, stream: &StreamName) -> Result<u64, EventStoreError> {
        self.store.stream_version(stream)
    }
}
