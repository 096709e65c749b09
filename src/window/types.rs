//! Windowed graph types: the node/edge lists handed to the layout adapter
//! and, once positioned, to the rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::family::Side;

pub const JUNCTION_PREFIX: &str = "j_";
pub const OUT_PORT_PREFIX: &str = "out";

/// Deterministic edge id: `e_{source}_{target}_{index}`.
pub fn edge_id(source: &str, target: &str, index: usize) -> String {
    format!("e_{}_{}_{}", source, target, index)
}

pub fn junction_id(parent: &str) -> String {
    format!("{}{}", JUNCTION_PREFIX, parent)
}

pub fn out_port(rank: usize) -> String {
    format!("{}{}", OUT_PORT_PREFIX, rank)
}

// ─── Geometry ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortSide {
    North,
    South,
}

/// A named attachment point; ports on one node are ordered by position in `ports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    pub side: PortSide,
}

// ─── Nodes ───────────────────────────────────────────────────────────────────

/// Birth-order tag on collateral unions, consumed by sibling realignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiblingTag {
    pub sibling_order: usize,
    pub sibling_parent_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionData {
    pub left_id: String,
    pub right_id: String,
    pub left_name: String,
    pub right_name: String,
    pub left_alive: bool,
    pub right_alive: bool,
    pub focus_side: Side,
    /// Union id passed back to `toggle_focus`.
    pub toggle: String,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub sibling: Option<SiblingTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonData {
    pub name: String,
    pub alive: bool,
    /// Person id passed back to `select_person`.
    pub select: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeKind {
    Union(UnionData),
    Person(PersonData),
    Junction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowNode {
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub size: Size,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
}

impl WindowNode {
    pub fn is_union(&self) -> bool {
        matches!(self.kind, NodeKind::Union(_))
    }

    pub fn is_junction(&self) -> bool {
        matches!(self.kind, NodeKind::Junction)
    }

    pub fn sibling_tag(&self) -> Option<&SiblingTag> {
        match &self.kind {
            NodeKind::Union(data) => data.sibling.as_ref(),
            _ => None,
        }
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl WindowEdge {
    pub fn new(source: &str, target: &str, index: usize) -> Self {
        Self {
            id: edge_id(source, target, index),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: None,
            target_handle: None,
        }
    }
}

// ─── Graph ───────────────────────────────────────────────────────────────────

/// The finite node/edge set currently rendered. Node and edge ids are unique.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowedGraph {
    pub nodes: Vec<WindowNode>,
    pub edges: Vec<WindowEdge>,
}

impl WindowedGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&WindowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Direct successors of `id`, in edge order.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.source == id)
            .map(|e| e.target.as_str())
            .collect()
    }

    /// Successors of `id` with junctions looked through, in port order.
    pub fn children_of(&self, id: &str) -> Vec<&str> {
        let mut out = Vec::new();
        for target in self.successors(id) {
            match self.node(target) {
                Some(node) if node.is_junction() => out.extend(self.successors(target)),
                _ => out.push(target),
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_window_types.rs"]
mod tests;
