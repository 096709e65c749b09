//! ForwardGraph — petgraph view of a windowed graph's edges, used to find
//! the subtree (node plus everything reachable forward) a correction moves.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use crate::window::types::WindowedGraph;

pub struct ForwardGraph {
    pub digraph: DiGraph<String, ()>,
    /// Maps node id → petgraph NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
}

impl ForwardGraph {
    pub fn from_window(graph: &WindowedGraph) -> Self {
        let mut digraph: DiGraph<String, ()> = DiGraph::new();
        let mut node_index: HashMap<String, NodeIndex> = HashMap::new();

        for node in &graph.nodes {
            ensure_node(&mut digraph, &mut node_index, &node.id);
        }
        for edge in &graph.edges {
            let from = ensure_node(&mut digraph, &mut node_index, &edge.source);
            let to = ensure_node(&mut digraph, &mut node_index, &edge.target);
            digraph.add_edge(from, to, ());
        }

        Self {
            digraph,
            node_index,
        }
    }

    /// Longest-path depth of every node below the graph's sources, or `None`
    /// when the edges contain a cycle.
    pub fn depths(&self) -> Option<HashMap<String, usize>> {
        let order = toposort(&self.digraph, None).ok()?;
        let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
        for n in order {
            let d = *depth.entry(n).or_insert(0);
            for succ in self.digraph.neighbors(n) {
                let entry = depth.entry(succ).or_insert(0);
                *entry = (*entry).max(d + 1);
            }
        }
        Some(
            depth
                .into_iter()
                .map(|(n, d)| (self.digraph[n].clone(), d))
                .collect(),
        )
    }

    /// `start` and every node reachable from it. Unknown ids yield just `start`.
    pub fn subtree(&self, start: &str) -> Vec<String> {
        let Some(&idx) = self.node_index.get(start) else {
            return vec![start.to_string()];
        };
        let mut dfs = Dfs::new(&self.digraph, idx);
        let mut out = Vec::new();
        while let Some(n) = dfs.next(&self.digraph) {
            out.push(self.digraph[n].clone());
        }
        out
    }
}

fn ensure_node(
    digraph: &mut DiGraph<String, ()>,
    node_index: &mut HashMap<String, NodeIndex>,
    id: &str,
) -> NodeIndex {
    if let Some(&idx) = node_index.get(id) {
        return idx;
    }
    let idx = digraph.add_node(id.to_string());
    node_index.insert(id.to_string(), idx);
    idx
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;
