//! Layout tree data structures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Reserved id of the root node.
pub const ROOT_ID: &str = "ROOT";

/// Component name expected on the root node.
pub const PAGE_COMPONENT: &str = "Page";

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reference to a component type.
///
/// Editors store this either as a bare name or as `{ "resolvedName": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentRef {
    Named(String),
    Resolved {
        #[serde(rename = "resolvedName")]
        resolved_name: String,
    },
}

impl ComponentRef {
    pub fn name(&self) -> &str {
        match self {
            ComponentRef::Named(name) => name,
            ComponentRef::Resolved { resolved_name } => resolved_name,
        }
    }
}

impl From<&str> for ComponentRef {
    fn from(name: &str) -> Self {
        ComponentRef::Named(name.to_string())
    }
}

/// A single node of a layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    #[serde(rename = "type")]
    pub component: ComponentRef,
    /// Properties in insertion order.
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Ordered child ids.
    #[serde(default, alias = "children")]
    pub nodes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl LayoutNode {
    pub fn new(component: impl Into<ComponentRef>) -> Self {
        Self { component: component.into(), props: Map::new(), nodes: Vec::new(), parent: None }
    }

    pub fn with_prop(mut self, name: &str, value: Value) -> Self {
        self.props.insert(name.to_string(), value);
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn component_name(&self) -> &str {
        self.component.name()
    }
}

/// A layout tree: nodes keyed by id, rooted at [`ROOT_ID`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTree {
    nodes: BTreeMap<String, LayoutNode>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, node: LayoutNode) -> Option<LayoutNode> {
        self.nodes.insert(id.into(), node)
    }

    pub fn with_node(mut self, id: &str, node: LayoutNode) -> Self {
        self.insert(id, node);
        self
    }

    pub fn get(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> Option<&LayoutNode> {
        self.get(ROOT_ID)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayoutNode)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }
}

/// Decode a layout tree from editor JSON.
pub fn parse_layout(json: &str) -> Result<LayoutTree, LayoutError> {
    Ok(serde_json::from_str(json)?)
}
