//! Event publisher backed by an event store.

use serde::Serialize;
use uuid::Uuid;

use contentrepo_core::{ExpectedVersion, StreamName};
use contentrepo_events::{Event, EventPublisher};

use crate::event_store::{EventStore, EventStoreError, UncommittedEvent};

/// Publishes typed events by appending them to an [`EventStore`].
///
/// Each `publish_many` call is one store append with `ExpectedVersion::Any`,
/// so the batch is atomic and never interleaved with another batch on the
/// same stream. Every event gets a fresh UUIDv7 event id.
#[derive(Debug)]
pub struct StoreEventPublisher<S> {
    store: S,
}

impl<S> StoreEventPublisher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<E, S> EventPublisher<E> for StoreEventPublisher<S>
where
    E: Event + Serialize,
    S: EventStore,
{
    type Error = EventStoreError;

    fn publish_many(&self, stream: &StreamName, events: Vec<E>) -> Result<(), Self::Error> {
        let uncommitted = events
            .iter()
            .map(|ev| UncommittedEvent::from_typed(Uuid::now_v7(), ev))
            .collect::<Result<Vec<_>, _>>()?;

        self.store.append(stream, uncommitted, ExpectedVersion::Any)?;
        Ok(())
    }
}
