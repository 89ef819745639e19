use serde::{Deserialize, Serialize};

use contentrepo_core::{
    DimensionValues, EditingSessionId, NodeId, NodeName, NodeTypeName, PropertyValue, StreamName,
};
use contentrepo_events::Command;

/// Command: CreateChildNodeWithVariant.
///
/// Creates `node_id` below `parent_node_id` in the variant addressed by
/// `dimension_values`, together with every child node its type auto-creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChildNodeWithVariant {
    pub editing_session_id: EditingSessionId,
    pub parent_node_id: NodeId,
    pub node_id: NodeId,
    pub node_name: NodeName,
    pub node_type_name: NodeTypeName,
    pub dimension_values: DimensionValues,
}

impl CreateChildNodeWithVariant {
    /// Synthetic command for a child node auto-created below this command's node.
    ///
    /// Session and dimension values are inherited; the identifier is derived
    /// from this node's identifier and the child name.
    pub fn for_auto_created_child(&self, child_name: NodeName, child_type: NodeTypeName) -> Self {
        Self {
            editing_session_id: self.editing_session_id,
            parent_node_id: self.node_id,
            node_id: NodeId::for_auto_created_child(&self.node_id, &child_name),
            node_name: child_name,
            node_type_name: child_type,
            dimension_values: self.dimension_values.clone(),
        }
    }
}

/// Command: SetProperty.
///
/// Accepted by the handler but not acted upon yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProperty {
    pub editing_session_id: EditingSessionId,
    pub node_id: NodeId,
    pub property_name: String,
    pub value: PropertyValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCommand {
    CreateChildNodeWithVariant(CreateChildNodeWithVariant),
    SetProperty(SetProperty),
}

impl NodeCommand {
    pub fn editing_session_id(&self) -> EditingSessionId {
        match self {
            NodeCommand::CreateChildNodeWithVariant(c) => c.editing_session_id,
            NodeCommand::SetProperty(c) => c.editing_session_id,
        }
    }
}

impl Command for CreateChildNodeWithVariant {
    fn target_stream(&self) -> StreamName {
        StreamName::for_editing_session(&self.editing_session_id)
    }
}

impl Command for SetProperty {
    fn target_stream(&self) -> StreamName {
        StreamName::for_editing_session(&self.editing_session_id)
    }
}

impl Command for NodeCommand {
    fn target_stream(&self) -> StreamName {
        StreamName::for_editing_session(&self.editing_session_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_created_child_command_inherits_session_and_dimensions() {
        let parent = CreateChildNodeWithVariant {
            editing_session_id: EditingSessionId::new(),
            parent_node_id: NodeId::new(),
            node_id: NodeId::new(),
            node_name: NodeName::new("about").unwrap(),
            node_type_name: NodeTypeName::new("Page").unwrap(),
            dimension_values: DimensionValues::new().with("language", "en"),
        };

        let child = parent.for_auto_created_child(
            NodeName::new("main").unwrap(),
            NodeTypeName::new("ContentCollection").unwrap(),
        );

        assert_eq!(child.editing_session_id, parent.editing_session_id);
        assert_eq!(child.parent_node_id, parent.node_id);
        assert_eq!(
            child.node_id,
            NodeId::for_auto_created_child(&parent.node_id, &child.node_name)
        );
        assert_eq!(child.node_name.as_str(), "main");
        assert_eq!(child.node_type_name.as_str(), "ContentCollection");
        assert_eq!(child.dimension_values, parent.dimension_values);
    }

    #[test]
    fn every_command_targets_its_editing_session_stream() {
        let session = EditingSessionId::new();
        let cmd = NodeCommand::SetProperty(SetProperty {
            editing_session_id: session,
            node_id: NodeId::new(),
            property_name: "title".to_string(),
            value: PropertyValue::new(serde_json::json!("Home"), Default::default()),
        });

        assert_eq!(
            cmd.target_stream().as_str(),
            format!("editingsession:{session}")
        );
    }
}
