//! Node type schemas and the registry that resolves them by name.
//!
//! A node type declares its properties (declared type + optional default) and
//! the child nodes that must exist whenever a node of the type exists.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use contentrepo_core::{DomainError, NodeName, NodeTypeName, PropertyType, PropertyValue, PropertyValues};

/// Declaration of one property of a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub property_type: PropertyType,
    pub default_value: Option<JsonValue>,
}

/// Schema of a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeType {
    name: NodeTypeName,
    properties: IndexMap<String, PropertyDefinition>,
    auto_created_child_nodes: IndexMap<NodeName, NodeTypeName>,
}

impl NodeType {
    pub fn new(name: NodeTypeName) -> Self {
        Self {
            name,
            properties: IndexMap::new(),
            auto_created_child_nodes: IndexMap::new(),
        }
    }

    /// Declare a property. Redeclaring a property replaces it in place.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        property_type: PropertyType,
        default_value: Option<JsonValue>,
    ) -> Self {
        self.properties.insert(
            name.into(),
            PropertyDefinition {
                property_type,
                default_value,
            },
        );
        self
    }

    /// Declare a child node that is auto-created with every node of this type.
    pub fn with_auto_created_child(mut self, name: NodeName, node_type: NodeTypeName) -> Self {
        self.auto_created_child_nodes.insert(name, node_type);
        self
    }

    pub fn name(&self) -> &NodeTypeName {
        &self.name
    }

    pub fn properties(&self) -> &IndexMap<String, PropertyDefinition> {
        &self.properties
    }

    /// Properties that declare a default value, in declaration order.
    pub fn default_values_for_properties(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.properties
            .iter()
            .filter_map(|(name, def)| def.default_value.as_ref().map(|v| (name.as_str(), v)))
    }

    /// Declared type of a property; undeclared properties are `string`.
    pub fn property_type(&self, property_name: &str) -> PropertyType {
        self.properties
            .get(property_name)
            .map(|def| def.property_type.clone())
            .unwrap_or_default()
    }

    /// Typed default property values for a freshly created node of this type.
    pub fn default_property_values(&self) -> PropertyValues {
        self.default_values_for_properties()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    PropertyValue::new(value.clone(), self.property_type(name)),
                )
            })
            .collect()
    }

    /// Child slot name → child type, in declaration order.
    pub fn auto_created_child_nodes(&self) -> &IndexMap<NodeName, NodeTypeName> {
        &self.auto_created_child_nodes
    }
}

/// Read access to node type schemas.
pub trait NodeTypeRegistry: Send + Sync {
    fn node_type(&self, name: &NodeTypeName) -> Option<&NodeType>;

    fn has_node_type(&self, name: &NodeTypeName) -> bool {
        self.node_type(name).is_some()
    }
}

impl<R> NodeTypeRegistry for Arc<R>
where
    R: NodeTypeRegistry + ?Sized,
{
    fn node_type(&self, name: &NodeTypeName) -> Option<&NodeType> {
        (**self).node_type(name)
    }
}

impl<R> NodeTypeRegistry for &R
where
    R: NodeTypeRegistry + ?Sized,
{
    fn node_type(&self, name: &NodeTypeName) -> Option<&NodeType> {
        (**self).node_type(name)
    }
}

#[derive(Debug, Error)]
pub enum NodeTypeLoadError {
    #[error("failed to read node types from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed node types document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid node type declaration: {0}")]
    Invalid(#[from] DomainError),
}

/// Node type registry held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNodeTypeRegistry {
    node_types: HashMap<NodeTypeName, NodeType>,
}

impl InMemoryNodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_type(mut self, node_type: NodeType) -> Self {
        self.register(node_type);
        self
    }

    /// Register (or replace) a node type.
    pub fn register(&mut self, node_type: NodeType) {
        self.node_types.insert(node_type.name().clone(), node_type);
    }

    pub fn len(&self) -> usize {
        self.node_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty()
    }

    /// Load node types from a JSON document:
    ///
    /// ```json
    /// {
    ///   "Acme:Page": {
    ///     "properties": { "title": { "type": "string", "defaultValue": "Untitled" } },
    ///     "childNodes": { "main": { "type": "Acme:ContentCollection" } }
    ///   }
    /// }
    /// ```
    ///
    /// Properties without `type` are `string`. Child nodes without `type` are rejected.
    pub fn from_json_str(json: &str) -> Result<Self, NodeTypeLoadError> {
        let declarations: IndexMap<NodeTypeName, NodeTypeDeclaration> = serde_json::from_str(json)?;

        let mut registry = Self::new();
        for (name, declaration) in declarations {
            registry.register(declaration.into_node_type(name)?);
        }
        Ok(registry)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NodeTypeLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NodeTypeLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

impl NodeTypeRegistry for InMemoryNodeTypeRegistry {
    fn node_type(&self, name: &NodeTypeName) -> Option<&NodeType> {
        self.node_types.get(name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeTypeDeclaration {
    #[serde(default)]
    properties: IndexMap<String, PropertyDeclaration>,
    #[serde(default)]
    child_nodes: IndexMap<NodeName, ChildNodeDeclaration>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDeclaration {
    #[serde(rename = "type", default)]
    property_type: Option<PropertyType>,
    #[serde(default)]
    default_value: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct ChildNodeDeclaration {
    #[serde(rename = "type", default)]
    node_type: Option<NodeTypeName>,
}

impl NodeTypeDeclaration {
    fn into_node_type(self, name: NodeTypeName) -> Result<NodeType, DomainError> {
        let mut node_type = NodeType::new(name);

        for (property_name, declaration) in self.properties {
            node_type = node_type.with_property(
                property_name,
                declaration.property_type.unwrap_or_default(),
                declaration.default_value,
            );
        }

        for (child_name, declaration) in self.child_nodes {
            let child_type = declaration.node_type.ok_or_else(|| {
                DomainError::validation(format!(
                    "child node \"{child_name}\" of \"{}\" has no type",
                    node_type.name()
                ))
            })?;
            node_type = node_type.with_auto_created_child(child_name, child_type);
        }

        Ok(node_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn type_name(s: &str) -> NodeTypeName {
        NodeTypeName::new(s).unwrap()
    }

    #[test]
    fn only_properties_with_defaults_become_values() {
        let page = NodeType::new(type_name("Page"))
            .with_property("title", PropertyType::new("string"), Some(json!("Untitled")))
            .with_property("hidden", PropertyType::new("boolean"), Some(json!(false)))
            .with_property("teaser", PropertyType::new("string"), None);

        let values = page.default_property_values();
        assert_eq!(values.len(), 2);
        assert_eq!(
            values.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["title", "hidden"]
        );
        assert_eq!(
            values["hidden"],
            PropertyValue::new(json!(false), PropertyType::new("boolean"))
        );
    }

    #[test]
    fn undeclared_properties_report_the_fallback_type() {
        let page = NodeType::new(type_name("Page"));
        assert_eq!(page.property_type("anything").as_str(), "string");
    }

    #[test]
    fn loads_json_declarations_in_order() {
        let registry = InMemoryNodeTypeRegistry::from_json_str(
            r#"{
                "Page": {
                    "properties": {
                        "title": { "type": "string", "defaultValue": "Untitled" },
                        "layout": { "defaultValue": "default" },
                        "publishAt": { "type": "DateTime", "defaultValue": null }
                    },
                    "childNodes": {
                        "main": { "type": "ContentCollection" },
                        "footer": { "type": "ContentCollection" }
                    }
                },
                "ContentCollection": {}
            }"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.has_node_type(&type_name("ContentCollection")));

        let page = registry.node_type(&type_name("Page")).unwrap();
        assert_eq!(page.property_type("layout").as_str(), "string");
        assert_eq!(page.property_type("publishAt").as_str(), "DateTime");
        assert_eq!(page.default_property_values().len(), 2);

        let slots: Vec<_> = page
            .auto_created_child_nodes()
            .keys()
            .map(NodeName::as_str)
            .collect();
        assert_eq!(slots, vec!["main", "footer"]);
    }

    #[test]
    fn child_node_without_type_is_rejected() {
        let err = InMemoryNodeTypeRegistry::from_json_str(r#"{ "Page": { "childNodes": { "main": {} } } }"#)
            .unwrap_err();
        match err {
            NodeTypeLoadError::Invalid(DomainError::Validation(msg)) => {
                assert!(msg.contains("main"));
            }
            other => panic!("Expected Invalid error, got {other:?}"),
        }
    }

    #[test]
    fn blank_type_names_are_rejected() {
        let err = InMemoryNodeTypeRegistry::from_json_str(r#"{ " ": {} }"#).unwrap_err();
        assert!(matches!(err, NodeTypeLoadError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = InMemoryNodeTypeRegistry::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
