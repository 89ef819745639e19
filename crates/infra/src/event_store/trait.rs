use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

use contentrepo_core::{ExpectedVersion, StreamName};
use std::sync::Arc;

/// An event ready to be appended to a stream (not yet assigned a sequence number).
///
/// Built from a typed domain event with [`UncommittedEvent::from_typed`], which
/// serializes the payload and captures the metadata needed to decode it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncommittedEvent {
    pub event_id: Uuid,
    pub event_type: String,
    pub event_version: u32,
    pub payload: JsonValue,
}

/// An event persisted in an append-only stream.
///
/// Sequence numbers are assigned by the store during append: 1-based,
/// contiguous and immutable per stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub event_id: Uuid,
    pub stream_name: StreamName,

    /// Monotonically increasing position in the stream.
    pub sequence_number: u64,

    pub event_type: String,
    pub event_version: u32,
    /// When the store accepted the append.
    pub recorded_at: DateTime<Utc>,

    pub payload: JsonValue,
}

impl StoredEvent {
    /// Convert a stored event into an envelope for publication on a bus.
    pub fn to_envelope(&self) -> contentrepo_events::EventEnvelope<JsonValue> {
        contentrepo_events::EventEnvelope::new(
            self.event_id,
            self.stream_name.clone(),
            self.sequence_number,
            self.event_type.clone(),
            self.payload.clone(),
        )
    }

    /// Decode the payload back into the typed event it was stored from.
    pub fn decode<E: DeserializeOwned>(&self) -> Result<E, EventStoreError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            EventStoreError::Deserialize(format!(
                "{} #{} ({}): {e}",
                self.stream_name, self.sequence_number, self.event_type
            ))
        })
    }
}

/// Event store operation error.
///
/// These are **infrastructure errors** (storage, concurrency, encoding) as
/// opposed to domain errors.
#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    #[error("invalid append: {0}")]
    InvalidAppend(String),

    #[error("event payload could not be decoded: {0}")]
    Deserialize(String),

    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only event store organized in named streams.
///
/// ## Append Semantics
///
/// `append()`:
/// - checks the expected version against the current stream version
/// - assigns sequence numbers starting at `current_version + 1`
/// - persists the batch atomically (all or nothing), contiguously and in order
/// - serializes appends to the same stream
///
/// ## Load Semantics
///
/// `load_stream()` returns the events in sequence order, or an empty vector
/// for a stream that was never written.
pub trait EventStore: Send + Sync {
    fn append(
        &self,
        stream: &StreamName,
        events: Vec<UncommittedEvent>,
        expected_version: ExpectedVersion,
    ) -> Result<Vec<StoredEvent>, EventStoreError>;

    fn load_stream(&self, stream: &StreamName) -> Result<Vec<StoredEvent>, EventStoreError>;

    /// Sequence number of the last event in the stream (0 if empty).
    fn stream_version(&self, stream: &StreamName) -> Result<u64, EventStoreError> {
        Ok(self
            .load_stream(stream)?
            .last()
            .map(|e| e.sequence_number)
            .unwrap_or(0))
    }
}

impl<S> EventStore for Arc<S>
where
    S: EventStore + ?Sized,
{
    fn append(
        &self,
        stream: &StreamName,
        events: Vec<UncommittedEvent>,
        expected_version: ExpectedVersion,
    ) -> Result<Vec<StoredEvent>, EventStoreError> {
        (**self).append(stream, events, expected_version)
    }

    fn load_stream(&self, stream: &StreamName) -> Result<Vec<StoredEvent>, EventStoreError> {
        (**self).load_stream(stream)
    }

    fn stream_version(&self, stream: &StreamName) -> Result<u64, EventStoreError> {
        (**self).stream_version(stream)
    }
}

impl UncommittedEvent {
    /// Build an uncommitted event from a typed domain event.
    pub fn from_typed<E>(event_id: Uuid, event: &E) -> Result<Self, EventStoreError>
    where
        E: contentrepo_events::Event + Serialize,
    {
        let payload = serde_json::to_value(event)
            .map_err(|e| EventStoreError::InvalidAppend(format!("payload serialization failed: {e}")))?;

        Ok(Self {
            event_id,
            event_type: event.event_type().to_string(),
            event_version: event.version(),
            payload,
        })
    }
}
