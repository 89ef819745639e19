//! Event publishing boundary used by command handlers.

use std::sync::Arc;

use contentrepo_core::StreamName;

use crate::Event;

/// Appends the events decided for one command to a named stream.
///
/// This is the only I/O a command handler performs. Implementations must make
/// `publish_many` atomic: either every event of the call lands in the stream,
/// contiguously and in the given order, or none does. Calls targeting the same
/// stream are serialized so one command's events are never interleaved with
/// another's.
///
/// Failures belong to the publisher's own error domain and are surfaced
/// unchanged; handlers do not retry or compensate.
pub trait EventPublisher<E: Event>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn publish_many(&self, stream: &StreamName, events: Vec<E>) -> Result<(), Self::Error>;
}

impl<E, P> EventPublisher<E> for Arc<P>
where
    E: Event,
    P: EventPublisher<E> + ?Sized,
{
    type Error = P::Error;

    fn publish_many(&self, stream: &StreamName, events: Vec<E>) -> Result<(), Self::Error> {
        (**self).publish_many(stream, events)
    }
}
