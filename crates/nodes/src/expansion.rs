//! Event sequence expansion: one creation command → the events for the node
//! and every node its type auto-creates, recursively.
//!
//! Output order is depth-first pre-order: a node's event precedes all of its
//! descendants' events, and sibling subtrees follow the declaration order of
//! the parent type's auto-created child nodes, each fully expanded before the
//! next one starts.
//!
//! Expansion is pure: the registry is the only thing read, nothing is written.
//! Any failure aborts the whole expansion without a partial result.

use tracing::debug;

use contentrepo_core::NodeTypeName;

use crate::command::CreateChildNodeWithVariant;
use crate::error::ExpansionError;
use crate::event::ChildNodeWithVariantWasCreated;
use crate::node_type::NodeTypeRegistry;

/// Default bound on how deeply auto-created child nodes may nest.
pub const DEFAULT_MAX_AUTO_CREATE_DEPTH: usize = 32;

/// Expands creation commands against a node type registry.
#[derive(Debug)]
pub struct EventSequenceBuilder<'a, R: ?Sized> {
    registry: &'a R,
    max_depth: usize,
}

impl<'a, R> EventSequenceBuilder<'a, R>
where
    R: NodeTypeRegistry + ?Sized,
{
    pub fn new(registry: &'a R) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_AUTO_CREATE_DEPTH,
        }
    }

    /// Limit the nesting depth of auto-created child nodes (0 = none allowed).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decide the creation events for `command` and all auto-created descendants.
    ///
    /// The first event always describes the requested node itself.
    pub fn expand(
        &self,
        command: &CreateChildNodeWithVariant,
    ) -> Result<Vec<ChildNodeWithVariantWasCreated>, ExpansionError> {
        let mut events = Vec::new();
        let mut path = Vec::new();
        self.expand_into(command, &mut path, &mut events)?;

        debug!(
            node_id = %command.node_id,
            node_type = %command.node_type_name,
            event_count = events.len(),
            "expanded node creation"
        );
        Ok(events)
    }

    /// `path` holds the type names of the nodes currently being expanded, root first.
    fn expand_into(
        &self,
        command: &CreateChildNodeWithVariant,
        path: &mut Vec<NodeTypeName>,
        events: &mut Vec<ChildNodeWithVariantWasCreated>,
    ) -> Result<(), ExpansionError> {
        let node_type = self
            .registry
            .node_type(&command.node_type_name)
            .ok_or_else(|| ExpansionError::NodeTypeNotFound(command.node_type_name.clone()))?;

        if path.contains(&command.node_type_name) {
            let mut cycle = path.clone();
            cycle.push(command.node_type_name.clone());
            return Err(ExpansionError::AutoCreationCycle { path: cycle });
        }
        if path.len() > self.max_depth {
            return Err(ExpansionError::MaxDepthExceeded {
                max_depth: self.max_depth,
                node_type_name: command.node_type_name.clone(),
            });
        }

        events.push(ChildNodeWithVariantWasCreated {
            parent_node_id: command.parent_node_id,
            node_id: command.node_id,
            node_name: command.node_name.clone(),
            node_type_name: command.node_type_name.clone(),
            dimension_values: command.dimension_values.clone(),
            properties: node_type.default_property_values(),
        });

        path.push(command.node_type_name.clone());
        for (child_name, child_type) in node_type.auto_created_child_nodes() {
            let child = command.for_auto_created_child(child_name.clone(), child_type.clone());
            self.expand_into(&child, path, events)?;
        }
        path.pop();

        Ok(())
    }
}
