//! Layout types: the solver input contract (LayoutGraph), its options,
//! solver output (SolvedLayout) and the positioned graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::window::types::{PortSide, WindowEdge, WindowNode};

pub const DUMMY_PREFIX: &str = "__dummy_";

// ─── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortConstraints {
    Free,
    #[default]
    FixedOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodePlacement {
    /// Pack each layer left to right; no alignment passes.
    Simple,
    /// Alternate down/up passes pulling nodes toward their neighbours.
    #[default]
    Balanced,
}

/// Fixed layered-layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub direction: Direction,
    pub port_constraints: PortConstraints,
    pub node_placement: NodePlacement,
    /// Align single-parent chains exactly above each other.
    pub improve_straightness: bool,
    /// Use input order as the initial order and as the tie-breaker.
    pub consider_model_order: bool,
    pub node_spacing: f64,
    pub layer_spacing: f64,
    pub edge_node_spacing: f64,
    pub edge_spacing: f64,
    /// Down/up alignment passes in balanced placement.
    pub placement_passes: usize,
    /// Barycenter sweeps in crossing minimisation.
    pub ordering_passes: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            port_constraints: PortConstraints::FixedOrder,
            node_placement: NodePlacement::Balanced,
            improve_straightness: true,
            consider_model_order: true,
            node_spacing: 90.0,
            layer_spacing: 140.0,
            edge_node_spacing: 70.0,
            edge_spacing: 30.0,
            placement_passes: 8,
            ordering_passes: 24,
        }
    }
}

// ─── Solver input ────────────────────────────────────────────────────────────

/// A port on a layout node. `id` is qualified as `node:port`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPort {
    pub id: String,
    pub side: PortSide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<LayoutPort>,
}

/// Edge endpoints are node ids or qualified port ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub sources: Vec<String>,
    pub targets: Vec<String>,
}

/// Generic layered-graph description handed to a solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutGraph {
    pub id: String,
    pub options: LayoutOptions,
    pub children: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

pub fn qualify_port(node_id: &str, port: &str) -> String {
    format!("{}:{}", node_id, port)
}

// ─── Solver output ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node id → centre point.
pub type Positions = HashMap<String, Point>;

/// Raw solver result: one centre point per laid-out node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolvedLayout {
    pub positions: Positions,
}

// ─── Positioned graph ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    #[serde(flatten)]
    pub node: WindowNode,
    pub position: Point,
}

/// The final output handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionedGraph {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<WindowEdge>,
}

impl PositionedGraph {
    pub fn position(&self, id: &str) -> Option<Point> {
        self.nodes
            .iter()
            .find(|n| n.node.id == id)
            .map(|n| n.position)
    }
}
