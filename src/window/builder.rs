//! Graph builder: derives the windowed subgraph from a root union, the focus
//! state and the pedigree rules.
//!
//! Steps:
//!   1. Root union and its (sorted) children
//!   2. Ascendant union of the active parent
//!   3. Right focus: the active parent's siblings, or their unions when the
//!      ascendant has a collateral-expansion rule
//!   4. Left focus: climb to the great (and great-great) union, surface the
//!      grandparent's siblings' unions with one or two levels below them
//!   5. Collapse repeats, drop dangling edges, insert junction fan-outs

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::focus::FocusState;
use super::rules::PedigreeRules;
use super::types::{
    NodeKind, PersonData, Port, PortSide, SiblingTag, UnionData, WindowEdge, WindowNode,
    WindowedGraph, junction_id, out_port,
};
use crate::config::NodeSizes;
use crate::family::siblings::sort_siblings;
use crate::family::{DataIndex, Person, Side, Union};

/// Build the windowed graph for `root_union_id` with default node sizes.
///
/// An unknown root yields an empty graph.
pub fn build_visible_graph(
    root_union_id: &str,
    focus: &FocusState,
    index: &DataIndex,
    rules: &PedigreeRules,
) -> WindowedGraph {
    GraphBuilder::new(index, focus, rules).build(root_union_id)
}

/// An edge recorded during construction, before fan-out.
#[derive(Debug, Clone)]
struct PendingEdge {
    source: String,
    target: String,
    index: usize,
}

/// Owns the growable node/edge containers plus the id sets that make every
/// insertion idempotent.
pub struct GraphBuilder<'a> {
    index: &'a DataIndex,
    focus: &'a FocusState,
    rules: &'a PedigreeRules,
    sizes: NodeSizes,
    nodes: Vec<WindowNode>,
    edges: Vec<PendingEdge>,
    node_ids: HashSet<String>,
    edge_ids: HashSet<String>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(index: &'a DataIndex, focus: &'a FocusState, rules: &'a PedigreeRules) -> Self {
        Self {
            index,
            focus,
            rules,
            sizes: NodeSizes::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            node_ids: HashSet::new(),
            edge_ids: HashSet::new(),
        }
    }

    pub fn with_sizes(mut self, sizes: NodeSizes) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn build(mut self, root_union_id: &str) -> WindowedGraph {
        let index = self.index;
        let Some(root) = index.union(root_union_id) else {
            debug!(root = %root_union_id, "root union not found; empty window");
            return WindowedGraph::default();
        };
        self.add_union_node(&root.id);

        let mut children = self.sorted_children(&root.id);
        if children.is_empty() {
            let mut fallback: Vec<&Person> = self
                .rules
                .default_children(&root.id)
                .iter()
                .filter_map(|id| index.person(id))
                .collect();
            sort_siblings(&mut fallback, index.collator());
            children = fallback;
        }
        self.add_children(&root.id, &children);

        let root_side = self.focus.side_of(root);
        let active_parent = root.partner(root_side);
        let ascendant = index
            .parent_union(active_parent)
            .and_then(|id| index.union(id));
        match ascendant {
            Some(asc) => {
                self.add_union_node(&asc.id);
                match root_side {
                    Side::Right => self.expand_right(root, asc),
                    Side::Left => self.expand_left(root, asc),
                }
            }
            None => debug!(parent = %active_parent, "active parent has no recorded parent union"),
        }

        self.finish()
    }

    // ── Branches ────────────────────────────────────────────────────────────

    /// Right focus: the focused parent's siblings hang from the ascendant union.
    fn expand_right(&mut self, root: &Union, asc: &Union) {
        let focused = root.partner(Side::Right);
        if self.rules.expands_collaterals(&asc.id) {
            if !self.expand_collaterals(root, asc, focused) {
                self.add_edge(&asc.id, &root.id, 0);
            }
            return;
        }

        let siblings = self.sorted_children(&asc.id);
        let rank = siblings
            .iter()
            .position(|p| p.id == focused)
            .unwrap_or(siblings.len());
        self.add_children(&asc.id, &siblings);
        // Same index as the focused parent, inserted later: fans out right after them.
        self.add_edge(&asc.id, &root.id, rank);
    }

    /// Collateral expansion: sibling unions of the focused parent, ordered by
    /// birth among the ascendant's children. Returns false when no sibling
    /// union resolves.
    fn expand_collaterals(&mut self, root: &Union, asc: &Union, focused: &str) -> bool {
        let index = self.index;
        let siblings = self.sorted_children(&asc.id);

        let mut slots: Vec<(usize, String, bool)> = Vec::new();
        let mut collaterals: Vec<String> = Vec::new();
        let mut root_placed = false;
        for (rank, sibling) in siblings.iter().enumerate() {
            if sibling.id == focused {
                slots.push((rank, root.id.clone(), true));
                root_placed = true;
                continue;
            }
            match index.union_of(&sibling.id) {
                Some(union_id)
                    if union_id != root.id
                        && union_id != asc.id
                        && index.union(union_id).is_some() =>
                {
                    slots.push((rank, union_id.to_string(), true));
                    collaterals.push(union_id.to_string());
                }
                _ => slots.push((rank, sibling.id.clone(), false)),
            }
        }
        if collaterals.is_empty() {
            debug!(ascendant = %asc.id, "no collateral unions to expand");
            return false;
        }
        if !root_placed {
            slots.push((siblings.len(), root.id.clone(), true));
        }

        for (rank, id, is_union) in &slots {
            let present = if *is_union {
                self.add_union_node(id)
            } else {
                self.add_person_node(id)
            };
            if present {
                self.add_edge(&asc.id, id, *rank);
            }
        }
        for union_id in &collaterals {
            let cousins = self.sorted_children(union_id);
            self.add_children(union_id, &cousins);
        }
        debug!(ascendant = %asc.id, collaterals = collaterals.len(), "collateral unions surfaced");
        true
    }

    /// Left focus: climb up to two more generations and surface the
    /// grandparent's siblings with their descendants.
    fn expand_left(&mut self, root: &Union, asc: &Union) {
        let index = self.index;
        let grandparent = asc.partner(self.focus.side_of(asc));
        let great = index
            .parent_union(grandparent)
            .and_then(|id| index.union(id));

        if let Some(great) = great {
            self.add_union_node(&great.id);

            let great_grandparent = great.partner(self.focus.side_of(great));
            if let Some(great_great) = index
                .parent_union(great_grandparent)
                .and_then(|id| index.union(id))
            {
                self.add_union_node(&great_great.id);
                self.add_edge(&great_great.id, &great.id, 0);
            }

            for (rank, child) in self.sorted_children(&great.id).into_iter().enumerate() {
                if child.id == grandparent {
                    self.add_edge(&great.id, &asc.id, rank);
                    continue;
                }
                let child_union = index.union_of(&child.id).filter(|id| index.union(id).is_some());
                match child_union {
                    Some(union_id) => {
                        self.add_union_node(union_id);
                        if union_id != asc.id {
                            self.set_sibling_tag(union_id, rank, &great.id);
                            self.expand_collateral_descendants(union_id);
                        }
                        self.add_edge(&great.id, union_id, rank);
                    }
                    None => {
                        if self.add_person_node(&child.id) {
                            self.add_edge(&great.id, &child.id, rank);
                        }
                    }
                }
            }
        }

        self.add_edge(&asc.id, &root.id, 0);
    }

    /// Children of a collateral union: partnered ones surface their own union
    /// and its children, the rest appear as people.
    fn expand_collateral_descendants(&mut self, union_id: &str) {
        let index = self.index;
        for (rank, child) in self.sorted_children(union_id).into_iter().enumerate() {
            match index.union_of(&child.id).filter(|id| index.union(id).is_some()) {
                Some(child_union) => {
                    self.add_union_node(child_union);
                    self.add_edge(union_id, child_union, rank);
                    let grandchildren = self.sorted_children(child_union);
                    self.add_children(child_union, &grandchildren);
                }
                None => {
                    if self.add_person_node(&child.id) {
                        self.add_edge(union_id, &child.id, rank);
                    }
                }
            }
        }
    }

    // ── Idempotent insertion ────────────────────────────────────────────────

    fn sorted_children(&self, union_id: &str) -> Vec<&'a Person> {
        let mut children = self.index.children(union_id);
        sort_siblings(&mut children, self.index.collator());
        children
    }

    /// Returns true when the union is (now) in the graph.
    fn add_union_node(&mut self, union_id: &str) -> bool {
        if self.node_ids.contains(union_id) {
            return true;
        }
        let Some(union) = self.index.union(union_id) else {
            return false;
        };
        let left = self.index.person(&union.partner_left_id);
        let right = self.index.person(&union.partner_right_id);
        let data = UnionData {
            left_id: union.partner_left_id.clone(),
            right_id: union.partner_right_id.clone(),
            left_name: self.index.display_name(&union.partner_left_id),
            right_name: self.index.display_name(&union.partner_right_id),
            left_alive: left.is_none_or(Person::is_alive),
            right_alive: right.is_none_or(Person::is_alive),
            focus_side: self.focus.side_of(union),
            toggle: union.id.clone(),
            sibling: None,
        };
        self.push_node(WindowNode {
            id: union.id.clone(),
            kind: NodeKind::Union(data),
            size: self.sizes.union,
            ports: Vec::new(),
        });
        true
    }

    /// Returns true when the person is (now) in the graph.
    fn add_person_node(&mut self, person_id: &str) -> bool {
        if self.node_ids.contains(person_id) {
            return true;
        }
        let Some(person) = self.index.person(person_id) else {
            return false;
        };
        let data = PersonData {
            name: person.display_name(self.index.locale()),
            alive: person.is_alive(),
            select: person.id.clone(),
        };
        self.push_node(WindowNode {
            id: person.id.clone(),
            kind: NodeKind::Person(data),
            size: self.sizes.person,
            ports: Vec::new(),
        });
        true
    }

    fn push_node(&mut self, node: WindowNode) {
        self.node_ids.insert(node.id.clone());
        self.nodes.push(node);
    }

    fn set_sibling_tag(&mut self, node_id: &str, order: usize, parent_id: &str) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) {
            if let NodeKind::Union(data) = &mut node.kind {
                data.sibling = Some(SiblingTag {
                    sibling_order: order,
                    sibling_parent_id: parent_id.to_string(),
                });
            }
        }
    }

    fn add_edge(&mut self, source: &str, target: &str, index: usize) {
        let id = super::types::edge_id(source, target, index);
        if !self.edge_ids.insert(id) {
            return;
        }
        self.edges.push(PendingEdge {
            source: source.to_string(),
            target: target.to_string(),
            index,
        });
    }

    fn add_children(&mut self, parent: &str, children: &[&Person]) {
        for (rank, child) in children.iter().enumerate() {
            if self.add_person_node(&child.id) {
                self.add_edge(parent, &child.id, rank);
            }
        }
    }

    // ── Finalisation ────────────────────────────────────────────────────────

    /// Collapse repeats (first position, last value), drop dangling edges and
    /// route every multi-child parent through a junction.
    fn finish(self) -> WindowedGraph {
        let mut position: HashMap<String, usize> = HashMap::new();
        let mut nodes: Vec<WindowNode> = Vec::new();
        for node in self.nodes {
            match position.get(&node.id) {
                Some(&i) => nodes[i] = node,
                None => {
                    position.insert(node.id.clone(), nodes.len());
                    nodes.push(node);
                }
            }
        }

        // Group surviving edges by source, keeping first-appearance order.
        let mut sources: Vec<String> = Vec::new();
        let mut fan: HashMap<String, Vec<(usize, usize, String)>> = HashMap::new();
        for (seq, edge) in self.edges.into_iter().enumerate() {
            if !position.contains_key(&edge.source) || !position.contains_key(&edge.target) {
                debug!(source = %edge.source, target = %edge.target, "dropping dangling edge");
                continue;
            }
            let group = fan.entry(edge.source.clone()).or_insert_with(|| {
                sources.push(edge.source.clone());
                Vec::new()
            });
            group.push((edge.index, seq, edge.target));
        }

        let mut edges: Vec<WindowEdge> = Vec::new();
        let mut edge_ids: HashSet<String> = HashSet::new();
        let mut junctions: HashMap<String, WindowNode> = HashMap::new();
        for source in &sources {
            let Some(mut group) = fan.remove(source) else {
                continue;
            };
            group.sort_by_key(|(index, seq, _)| (*index, *seq));
            if group.len() == 1 {
                let (index, _, target) = &group[0];
                push_edge(&mut edges, &mut edge_ids, WindowEdge::new(source, target, *index));
                continue;
            }

            let junction = free_junction_id(source, &position, &junctions);
            push_edge(&mut edges, &mut edge_ids, WindowEdge::new(source, &junction, 0));
            let mut ports = Vec::with_capacity(group.len());
            for (rank, (_, _, target)) in group.iter().enumerate() {
                let port = out_port(rank);
                let mut edge = WindowEdge::new(&junction, target, rank);
                edge.source_handle = Some(port.clone());
                push_edge(&mut edges, &mut edge_ids, edge);
                ports.push(Port {
                    id: port,
                    side: PortSide::South,
                });
            }
            junctions.insert(
                source.clone(),
                WindowNode {
                    id: junction,
                    kind: NodeKind::Junction,
                    size: self.sizes.junction,
                    ports,
                },
            );
        }

        // Junctions follow their parent so the solver sees them in model order.
        let mut ordered: Vec<WindowNode> = Vec::with_capacity(nodes.len() + junctions.len());
        for node in nodes {
            let junction = junctions.remove(&node.id);
            ordered.push(node);
            if let Some(junction) = junction {
                ordered.push(junction);
            }
        }

        debug!(nodes = ordered.len(), edges = edges.len(), "windowed graph built");
        WindowedGraph {
            nodes: ordered,
            edges,
        }
    }
}

/// `j_{parent}`, or `j_{parent}~n` when a dataset node or an earlier
/// junction already owns that id.
fn free_junction_id(
    parent: &str,
    nodes: &HashMap<String, usize>,
    junctions: &HashMap<String, WindowNode>,
) -> String {
    let base = junction_id(parent);
    let taken = |id: &str| nodes.contains_key(id) || junctions.values().any(|j| j.id == id);
    let mut id = base.clone();
    let mut n = 1;
    while taken(id.as_str()) {
        id = format!("{base}~{n}");
        n += 1;
    }
    id
}

fn push_edge(edges: &mut Vec<WindowEdge>, ids: &mut HashSet<String>, edge: WindowEdge) {
    if ids.insert(edge.id.clone()) {
        edges.push(edge);
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_builder.rs"]
mod tests;
