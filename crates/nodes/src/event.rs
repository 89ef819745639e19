use serde::{Deserialize, Serialize};

use contentrepo_core::{DimensionValues, NodeId, NodeName, NodeTypeName, PropertyValues};
use contentrepo_events::Event;

/// Event: ChildNodeWithVariantWasCreated.
///
/// One per materialized node: the requested node and each auto-created descendant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildNodeWithVariantWasCreated {
    pub parent_node_id: NodeId,
    pub node_id: NodeId,
    pub node_name: NodeName,
    pub node_type_name: NodeTypeName,
    pub dimension_values: DimensionValues,
    /// Default property values of the node's own type, in declaration order.
    pub properties: PropertyValues,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeEvent {
    ChildNodeWithVariantWasCreated(ChildNodeWithVariantWasCreated),
}

impl From<ChildNodeWithVariantWasCreated> for NodeEvent {
    fn from(value: ChildNodeWithVariantWasCreated) -> Self {
        NodeEvent::ChildNodeWithVariantWasCreated(value)
    }
}

impl Event for NodeEvent {
    fn event_type(&self) -> &'static str {
        match self {
            NodeEvent::ChildNodeWithVariantWasCreated(_) => "node.child_node_with_variant.created",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}
