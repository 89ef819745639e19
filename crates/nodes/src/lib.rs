//! Node domain module (event-sourced).
//!
//! Turns node commands into the ordered events that materialize a node and
//! every child node its type auto-creates. Everything here is deterministic
//! domain logic; the only I/O is the injected [`EventPublisher`].
//!
//! [`EventPublisher`]: contentrepo_events::EventPublisher

pub mod command;
pub mod error;
pub mod event;
pub mod expansion;
pub mod handler;
pub mod node_type;

#[cfg(test)]
mod fixtures;

pub use command::{CreateChildNodeWithVariant, NodeCommand, SetProperty};
pub use error::{ExpansionError, NodeCommandError};
pub use event::{ChildNodeWithVariantWasCreated, NodeEvent};
pub use expansion::{DEFAULT_MAX_AUTO_CREATE_DEPTH, EventSequenceBuilder};
pub use handler::NodeCommandHandler;
pub use node_type::{
    InMemoryNodeTypeRegistry, NodeType, NodeTypeLoadError, NodeTypeRegistry, PropertyDefinition,
};
