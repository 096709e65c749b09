//! Layout adapter: windowed graph → solver input → positioned graph.

pub mod graph;
pub mod postprocess;
pub mod sugiyama;
pub mod types;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ChartConfig;
use crate::error::LayoutError;
use crate::window::types::WindowedGraph;

pub use graph::ForwardGraph;
pub use sugiyama::{SugiyamaLayout, SugiyamaSolver};
pub use types::{
    LayoutEdge, LayoutGraph, LayoutNode, LayoutOptions, LayoutPort, Point, PositionedGraph,
    PositionedNode, Positions, SolvedLayout, qualify_port,
};

/// A layered-graph auto-layout algorithm. Solving is the only suspension
/// point in the pipeline.
#[async_trait]
pub trait LayoutSolver: Send + Sync {
    async fn solve(&self, graph: &LayoutGraph) -> Result<SolvedLayout, LayoutError>;
}

/// Translate a windowed graph into the solver's input contract.
pub fn describe(graph: &WindowedGraph, options: &LayoutOptions) -> LayoutGraph {
    let children = graph
        .nodes
        .iter()
        .map(|node| LayoutNode {
            id: node.id.clone(),
            width: node.size.width,
            height: node.size.height,
            ports: node
                .ports
                .iter()
                .map(|port| LayoutPort {
                    id: qualify_port(&node.id, &port.id),
                    side: port.side,
                })
                .collect(),
        })
        .collect();

    let endpoint = |node: &str, handle: &Option<String>| match handle {
        Some(port) => qualify_port(node, port),
        None => node.to_string(),
    };
    let edges = graph
        .edges
        .iter()
        .map(|edge| LayoutEdge {
            id: edge.id.clone(),
            sources: vec![endpoint(&edge.source, &edge.source_handle)],
            targets: vec![endpoint(&edge.target, &edge.target_handle)],
        })
        .collect();

    LayoutGraph {
        id: "root".to_string(),
        options: options.clone(),
        children,
        edges,
    }
}

/// One position per windowed node; nodes the solver skipped sit at the origin.
pub fn extract_positions(graph: &WindowedGraph, solved: &SolvedLayout) -> Positions {
    graph
        .nodes
        .iter()
        .map(|node| {
            let point = solved.positions.get(&node.id).copied().unwrap_or_default();
            (node.id.clone(), point)
        })
        .collect()
}

/// Solve, correct and attach positions. Nothing partial is returned on failure.
pub async fn layout(
    graph: &WindowedGraph,
    solver: &dyn LayoutSolver,
    config: &ChartConfig,
) -> Result<PositionedGraph, LayoutError> {
    if graph.is_empty() {
        return Ok(PositionedGraph::default());
    }
    let input = describe(graph, &config.layout);
    let solved = solver.solve(&input).await?;
    let mut positions = extract_positions(graph, &solved);
    postprocess::correct(&mut positions, graph, &config.rules, &config.overlap);
    debug!(nodes = positions.len(), "layout corrected");

    let nodes = graph
        .nodes
        .iter()
        .map(|node| PositionedNode {
            node: node.clone(),
            position: positions.get(&node.id).copied().unwrap_or_default(),
        })
        .collect();
    Ok(PositionedGraph {
        nodes,
        edges: graph.edges.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_adapter.rs"]
mod tests;
