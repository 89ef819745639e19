//! Node command handler: the entry point of the node command path.
//!
//! ```text
//! Command
//!   ↓
//! 1. Expand into creation events (pure, registry reads only)
//!   ↓
//! 2. Publish all events in one append to the editing session stream
//! ```
//!
//! The handler holds no mutable state. A failed expansion publishes nothing;
//! a failed publish is reported unchanged and never retried.

use tracing::{debug, info, warn};

use contentrepo_events::{Command, EventPublisher};

use crate::command::{CreateChildNodeWithVariant, NodeCommand, SetProperty};
use crate::error::NodeCommandError;
use crate::event::{ChildNodeWithVariantWasCreated, NodeEvent};
use crate::expansion::{DEFAULT_MAX_AUTO_CREATE_DEPTH, EventSequenceBuilder};
use crate::node_type::NodeTypeRegistry;

/// Handles node commands against an injected registry and publisher.
///
/// - `R`: node type registry (read-only)
/// - `P`: event publisher (the only I/O)
#[derive(Debug)]
pub struct NodeCommandHandler<R, P> {
    registry: R,
    publisher: P,
    max_auto_create_depth: usize,
}

impl<R, P> NodeCommandHandler<R, P> {
    pub fn new(registry: R, publisher: P) -> Self {
        Self {
            registry,
            publisher,
            max_auto_create_depth: DEFAULT_MAX_AUTO_CREATE_DEPTH,
        }
    }

    pub fn with_max_auto_create_depth(mut self, max_depth: usize) -> Self {
        self.max_auto_create_depth = max_depth;
        self
    }
}

impl<R, P> NodeCommandHandler<R, P>
where
    R: NodeTypeRegistry,
    P: EventPublisher<NodeEvent>,
{
    /// Dispatch any node command. Returns the events that were published.
    pub fn handle(&self, command: NodeCommand) -> Result<Vec<NodeEvent>, NodeCommandError<P::Error>> {
        match command {
            NodeCommand::CreateChildNodeWithVariant(cmd) => Ok(self
                .handle_create_child_node_with_variant(cmd)?
                .into_iter()
                .map(NodeEvent::from)
                .collect()),
            NodeCommand::SetProperty(cmd) => {
                self.handle_set_property(cmd)?;
                Ok(vec![])
            }
        }
    }

    /// Create a node and all of its auto-created descendants.
    ///
    /// Publishes every resulting event in a single append to
    /// `editingsession:<editing session id>`.
    pub fn handle_create_child_node_with_variant(
        &self,
        command: CreateChildNodeWithVariant,
    ) -> Result<Vec<ChildNodeWithVariantWasCreated>, NodeCommandError<P::Error>> {
        let events = EventSequenceBuilder::new(&self.registry)
            .with_max_depth(self.max_auto_create_depth)
            .expand(&command)
            .inspect_err(|err| {
                warn!(
                    node_id = %command.node_id,
                    node_type = %command.node_type_name,
                    "rejected node creation: {err}"
                );
            })?;

        let stream = command.target_stream();
        let published: Vec<NodeEvent> = events.iter().cloned().map(NodeEvent::from).collect();
        self.publisher
            .publish_many(&stream, published)
            .map_err(NodeCommandError::Publish)?;

        info!(
            stream = %stream,
            node_id = %command.node_id,
            node_type = %command.node_type_name,
            dimensions = %command.dimension_values,
            event_count = events.len(),
            "node created"
        );
        Ok(events)
    }

    /// Property changes are accepted but not recorded yet: no event, no error.
    pub fn handle_set_property(&self, command: SetProperty) -> Result<(), NodeCommandError<P::Error>> {
        debug!(
            node_id = %command.node_id,
            property = %command.property_name,
            "set property accepted; property changes are not recorded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use contentrepo_core::{NodeId, PropertyType, PropertyValue, StreamName};

    use crate::error::ExpansionError;
    use crate::fixtures::{FailingPublisher, RecordingPublisher, create_command, page_registry, type_name};

    #[test]
    fn create_publishes_all_events_in_one_append() {
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = NodeCommandHandler::new(page_registry(), publisher.clone());
        let cmd = create_command("Page");

        let events = handler.handle_create_child_node_with_variant(cmd.clone()).unwrap();
        assert_eq!(events.len(), 3);

        let calls = publisher.calls();
        assert_eq!(calls.len(), 1);
        let (stream, published) = &calls[0];
        assert_eq!(*stream, StreamName::for_editing_session(&cmd.editing_session_id));
        assert_eq!(
            stream.as_str(),
            format!("editingsession:{}", cmd.editing_session_id)
        );
        let expected: Vec<NodeEvent> = events.into_iter().map(NodeEvent::from).collect();
        assert_eq!(published, &expected);
    }

    #[test]
    fn unknown_type_publishes_nothing() {
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = NodeCommandHandler::new(page_registry(), publisher.clone());

        let err = handler
            .handle_create_child_node_with_variant(create_command("Missing"))
            .unwrap_err();

        assert_eq!(err.missing_node_type(), Some(&type_name("Missing")));
        assert!(publisher.calls().is_empty());
    }

    #[test]
    fn depth_limit_is_applied_before_publishing() {
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = NodeCommandHandler::new(page_registry(), publisher.clone())
            .with_max_auto_create_depth(0);

        let err = handler
            .handle_create_child_node_with_variant(create_command("Page"))
            .unwrap_err();

        assert!(matches!(
            err,
            NodeCommandError::Expansion(ExpansionError::MaxDepthExceeded { max_depth: 0, .. })
        ));
        assert!(publisher.calls().is_empty());
    }

    #[test]
    fn publish_failure_propagates_unchanged() {
        let handler = NodeCommandHandler::new(page_registry(), FailingPublisher);

        let err = handler
            .handle_create_child_node_with_variant(create_command("Page"))
            .unwrap_err();

        match err {
            NodeCommandError::Publish(msg) => assert_eq!(msg, "stream store unavailable"),
            other => panic!("Expected Publish error, got {other:?}"),
        }
    }

    #[test]
    fn set_property_is_accepted_without_events() {
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = NodeCommandHandler::new(page_registry(), publisher.clone());
        let cmd = SetProperty {
            editing_session_id: create_command("Page").editing_session_id,
            node_id: NodeId::new(),
            property_name: "title".to_string(),
            value: PropertyValue::new(json!("Home"), PropertyType::new("string")),
        };

        let events = handler.handle(NodeCommand::SetProperty(cmd)).unwrap();

        assert!(events.is_empty());
        assert!(publisher.calls().is_empty());
    }

    #[test]
    fn handle_dispatches_creation() {
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = NodeCommandHandler::new(page_registry(), publisher.clone());

        let events = handler
            .handle(NodeCommand::CreateChildNodeWithVariant(create_command("Page")))
            .unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(publisher.calls()[0].1, events);
    }

    #[test]
    fn handler_is_shareable_across_threads() {
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = Arc::new(NodeCommandHandler::new(page_registry(), publisher.clone()));

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handler = handler.clone();
                std::thread::spawn(move || {
                    handler
                        .handle_create_child_node_with_variant(create_command("Page"))
                        .unwrap()
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let calls = publisher.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|(_, events)| events.len() == 3));
    }
}
