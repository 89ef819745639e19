//! Shared test fixtures for the node command path.

use std::sync::Mutex;

use serde_json::json;

use contentrepo_core::{
    DimensionValues, EditingSessionId, NodeId, NodeName, NodeTypeName, PropertyType, StreamName,
};
use contentrepo_events::EventPublisher;

use crate::{CreateChildNodeWithVariant, InMemoryNodeTypeRegistry, NodeEvent, NodeType};

pub fn node_name(s: &str) -> NodeName {
    NodeName::new(s).unwrap()
}

pub fn type_name(s: &str) -> NodeTypeName {
    NodeTypeName::new(s).unwrap()
}

/// `Page` auto-creates `main: ContentCollection`, which auto-creates `item: Text`.
pub fn page_registry() -> InMemoryNodeTypeRegistry {
    InMemoryNodeTypeRegistry::new()
        .with_node_type(
            NodeType::new(type_name("Page"))
                .with_property("title", PropertyType::new("string"), Some(json!("Untitled")))
                .with_auto_created_child(node_name("main"), type_name("ContentCollection")),
        )
        .with_node_type(
            NodeType::new(type_name("ContentCollection"))
                .with_auto_created_child(node_name("item"), type_name("Text")),
        )
        .with_node_type(
            NodeType::new(type_name("Text"))
                .with_property("text", PropertyType::new("string"), Some(json!("")))
                .with_property("wrap", PropertyType::new("boolean"), Some(json!(true))),
        )
}

pub fn create_command(node_type: &str) -> CreateChildNodeWithVariant {
    CreateChildNodeWithVariant {
        editing_session_id: EditingSessionId::new(),
        parent_node_id: NodeId::new(),
        node_id: NodeId::new(),
        node_name: node_name("about"),
        node_type_name: type_name(node_type),
        dimension_values: DimensionValues::new().with("language", "en_US"),
    }
}

/// Publisher that records every call.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(StreamName, Vec<NodeEvent>)>>,
}

impl RecordingPublisher {
    pub fn calls(&self) -> Vec<(StreamName, Vec<NodeEvent>)> {
        self.published.lock().unwrap().clone()
    }
}

impl EventPublisher<NodeEvent> for RecordingPublisher {
    type Error = String;

    fn publish_many(&self, stream: &StreamName, events: Vec<NodeEvent>) -> Result<(), Self::Error> {
        self.published.lock().unwrap().push((stream.clone(), events));
        Ok(())
    }
}

/// Publisher whose append always fails.
#[derive(Debug, Default)]
pub struct FailingPublisher;

impl EventPublisher<NodeEvent> for FailingPublisher {
    type Error = String;

    fn publish_many(&self, _stream: &StreamName, _events: Vec<NodeEvent>) -> Result<(), Self::Error> {
        Err("stream store unavailable".to_string())
    }
}
