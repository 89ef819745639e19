//! Infrastructure layer: event storage, store-backed publishing, configuration.

pub mod config;
pub mod event_store;
pub mod publisher;


pub use config::{ConfigError, RepositoryConfig};
pub use event_store::{EventStore, EventStoreError, InMemoryEventStore, PublishingEventStore};
pub use publisher::StoreEventPublisher;
