//! Errors of the node command path.

use thiserror::Error;

use contentrepo_core::NodeTypeName;

/// Why a creation command could not be expanded into events.
///
/// Every variant aborts the whole expansion; no partial event list exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    /// The requested type, or the type of an auto-created child, is unknown.
    #[error("node type \"{0}\" not found")]
    NodeTypeNotFound(NodeTypeName),

    /// The auto-created child declarations lead back to a type already being expanded.
    #[error("auto-created child nodes form a cycle: {}", join_path(.path))]
    AutoCreationCycle { path: Vec<NodeTypeName> },

    /// Auto-created child nodes nest deeper than allowed.
    #[error("auto-created child nodes nest deeper than {max_depth} levels (at node type \"{node_type_name}\")")]
    MaxDepthExceeded {
        max_depth: usize,
        node_type_name: NodeTypeName,
    },
}

fn join_path(path: &[NodeTypeName]) -> String {
    path.iter()
        .map(NodeTypeName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Node command handling error.
///
/// `E` is the publisher's error type; publish failures are carried unchanged.
#[derive(Debug, Error)]
pub enum NodeCommandError<E> {
    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error("event publication failed: {0}")]
    Publish(E),
}

impl<E> NodeCommandError<E> {
    /// The missing node type, if this is a `NodeTypeNotFound` failure.
    pub fn missing_node_type(&self) -> Option<&NodeTypeName> {
        match self {
            NodeCommandError::Expansion(ExpansionError::NodeTypeNotFound(name)) => Some(name),
            _ => None,
        }
    }
}
