use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::instrument;

use contentrepo_core::{ExpectedVersion, StreamName};

use super::r#trait::{EventStore, EventStoreError, StoredEvent, UncommittedEvent};

/// In-memory append-only event store.
///
/// One write lock guards all streams, so an append is atomic and appends to
/// the same stream never interleave. Intended for tests/dev and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    streams: RwLock<HashMap<StreamName, Vec<StoredEvent>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_version(stream: &[StoredEvent]) -> u64 {
        stream.last().map(|e| e.sequence_number).unwrap_or(0)
    }

    /// Names of all streams written so far, sorted.
    pub fn stream_names(&self) -> Result<Vec<StreamName>, EventStoreError> {
        let streams = self
            .streams
            .read()
            .map_err(|_| EventStoreError::Unavailable("lock poisoned".to_string()))?;
        let mut names: Vec<_> = streams.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl EventStore for InMemoryEventStore {
    #[instrument(
        skip_all,
        fields(stream = %stream, event_count = events.len(), expected_version = ?expected_version),
        err
    )]
    fn append(
        &self,
        stream: &StreamName,
        events: Vec<UncommittedEvent>,
        expected_version: ExpectedVersion,
    ) -> Result<Vec<StoredEvent>, EventStoreError> {
        if events.is_empty() {
            return Ok(vec![]);
        }

        let mut streams = self
            .streams
            .write()
            .map_err(|_| EventStoreError::Unavailable("lock poisoned".to_string()))?;

        let current = streams
            .get(stream)
            .map(|s| Self::current_version(s))
            .unwrap_or(0);

        expected_version
            .check(current)
            .map_err(|err| EventStoreError::Concurrency(format!("stream {stream}: {err}")))?;

        let recorded_at = Utc::now();
        let committed: Vec<StoredEvent> = events
            .into_iter()
            .zip(current + 1..)
            .map(|(e, sequence_number)| StoredEvent {
                event_id: e.event_id,
                stream_name: stream.clone(),
                sequence_number,
                event_type: e.event_type,
                event_version: e.event_version,
                recorded_at,
                payload: e.payload,
            })
            .collect();

        streams
            .entry(stream.clone())
            .or_default()
            .extend(committed.iter().cloned());

        Ok(committed)
    }

    #[instrument(skip_all, fields(stream = %stream), err)]
    fn load_stream(&self, stream: &StreamName) -> Result<Vec<StoredEvent>, EventStoreError> {
        let streams = self
            .streams
            .read()
            .map_err(|_| EventStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(streams.get(stream).cloned().unwrap_or_default())
    }
}
