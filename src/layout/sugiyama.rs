//! Sugiyama layered graph layout — the bundled [`LayoutSolver`].
//!
//! Phases:
//!   1. Endpoint resolution (qualified ports → node + port rank)
//!   2. Cycle removal (greedy-FAS)
//!   3. Layer assignment (longest path, sources pulled down)
//!   4. Dummy node insertion
//!   5. Crossing minimisation (model-order seed, port-aware barycenter)
//!   6. Coordinate assignment (balanced isotonic placement)

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;

use super::LayoutSolver;
use super::types::{
    DUMMY_PREFIX, Direction, LayoutGraph, LayoutOptions, NodePlacement, Point, PortConstraints,
    SolvedLayout,
};
use crate::error::LayoutError;

// ─── Mini-graph helpers ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct AdjEdge {
    src: String,
    tgt: String,
    /// Rank of the source port, when the edge leaves through one.
    port: Option<usize>,
}

/// Lightweight adjacency graph used by every phase.
#[derive(Debug, Clone, Default)]
pub struct AdjGraph {
    /// All node ids, in model order.
    nodes: Vec<String>,
    successors: HashMap<String, Vec<String>>,
    predecessors: HashMap<String, Vec<String>>,
    edges: Vec<AdjEdge>,
}

impl AdjGraph {
    fn new() -> Self {
        Self::default()
    }

    fn contains(&self, id: &str) -> bool {
        self.successors.contains_key(id)
    }

    fn add_node(&mut self, id: &str) {
        if !self.contains(id) {
            self.nodes.push(id.to_string());
            self.successors.insert(id.to_string(), Vec::new());
            self.predecessors.insert(id.to_string(), Vec::new());
        }
    }

    fn add_edge(&mut self, src: &str, tgt: &str, port: Option<usize>) {
        self.successors
            .entry(src.to_string())
            .or_default()
            .push(tgt.to_string());
        self.predecessors
            .entry(tgt.to_string())
            .or_default()
            .push(src.to_string());
        self.edges.push(AdjEdge {
            src: src.to_string(),
            tgt: tgt.to_string(),
            port,
        });
    }

    fn out_degree(&self, id: &str) -> usize {
        self.successors.get(id).map(|v| v.len()).unwrap_or(0)
    }

    fn in_degree(&self, id: &str) -> usize {
        self.predecessors.get(id).map(|v| v.len()).unwrap_or(0)
    }

    fn successors_of(&self, id: &str) -> &[String] {
        self.successors.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn predecessors_of(&self, id: &str) -> &[String] {
        self.predecessors
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Node sizes and port counts collected from the input.
struct NodeInfo {
    size: HashMap<String, (f64, f64)>,
    port_count: HashMap<String, usize>,
}

impl NodeInfo {
    fn size(&self, id: &str) -> (f64, f64) {
        self.size.get(id).copied().unwrap_or((0.0, 0.0))
    }

    fn is_dummy(id: &str) -> bool {
        id.starts_with(DUMMY_PREFIX)
    }
}

// ─── Endpoint resolution ─────────────────────────────────────────────────────

fn resolve(graph: &LayoutGraph) -> Result<(AdjGraph, NodeInfo), LayoutError> {
    let mut ag = AdjGraph::new();
    let mut size: HashMap<String, (f64, f64)> = HashMap::new();
    let mut port_count: HashMap<String, usize> = HashMap::new();
    let mut ports: HashMap<&str, (&str, usize)> = HashMap::new();

    for node in &graph.children {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(node.width) || !valid(node.height) {
            return Err(LayoutError::Rejected(format!(
                "node '{}' has invalid size {}x{}",
                node.id, node.width, node.height
            )));
        }
        ag.add_node(&node.id);
        size.insert(node.id.clone(), (node.width, node.height));
        port_count.insert(node.id.clone(), node.ports.len());
        for (rank, port) in node.ports.iter().enumerate() {
            ports.insert(port.id.as_str(), (node.id.as_str(), rank));
        }
    }

    for edge in &graph.edges {
        let endpoint = |reference: &String| -> Result<(String, Option<usize>), LayoutError> {
            if ag.contains(reference) {
                return Ok((reference.clone(), None));
            }
            match ports.get(reference.as_str()) {
                Some(&(node, rank)) => Ok((node.to_string(), Some(rank))),
                None => Err(LayoutError::UnknownEndpoint {
                    edge: edge.id.clone(),
                    endpoint: reference.clone(),
                }),
            }
        };
        let mut resolved: Vec<(String, String, Option<usize>)> = Vec::new();
        for source in &edge.sources {
            let (src, port) = endpoint(source)?;
            for target in &edge.targets {
                let (tgt, _) = endpoint(target)?;
                resolved.push((src.clone(), tgt, port));
            }
        }
        for (src, tgt, port) in resolved {
            ag.add_edge(&src, &tgt, port);
        }
    }

    Ok((ag, NodeInfo { size, port_count }))
}

// ─── Cycle Removal (Greedy-FAS) ─────────────────────────────────────────────

/// Compute a node ordering using the greedy-FAS heuristic.
///
/// Candidates are scanned in model order so the result is deterministic.
fn greedy_fas_ordering(ag: &AdjGraph) -> Vec<String> {
    let mut active: HashSet<&str> = ag.nodes.iter().map(String::as_str).collect();
    let mut out_deg: HashMap<&str, i64> = HashMap::new();
    let mut in_deg: HashMap<&str, i64> = HashMap::new();
    for node in &ag.nodes {
        out_deg.insert(node.as_str(), ag.out_degree(node) as i64);
        in_deg.insert(node.as_str(), ag.in_degree(node) as i64);
    }

    let mut s1: Vec<String> = Vec::new();
    let mut s2: Vec<String> = Vec::new();

    while !active.is_empty() {
        loop {
            let sinks: Vec<&str> = ag
                .nodes
                .iter()
                .map(String::as_str)
                .filter(|n| active.contains(n) && out_deg.get(n).copied().unwrap_or(0) == 0)
                .collect();
            if sinks.is_empty() {
                break;
            }
            for sink in sinks {
                active.remove(sink);
                s2.push(sink.to_string());
                for pred in ag.predecessors_of(sink) {
                    if active.contains(pred.as_str()) {
                        *out_deg.entry(pred.as_str()).or_insert(0) -= 1;
                    }
                }
            }
        }

        loop {
            let sources: Vec<&str> = ag
                .nodes
                .iter()
                .map(String::as_str)
                .filter(|n| active.contains(n) && in_deg.get(n).copied().unwrap_or(0) == 0)
                .collect();
            if sources.is_empty() {
                break;
            }
            for source in sources {
                active.remove(source);
                s1.push(source.to_string());
                for succ in ag.successors_of(source) {
                    if active.contains(succ.as_str()) {
                        *in_deg.entry(succ.as_str()).or_insert(0) -= 1;
                    }
                }
            }
        }

        let best = ag
            .nodes
            .iter()
            .map(String::as_str)
            .filter(|n| active.contains(n))
            .max_by_key(|n| {
                out_deg.get(n).copied().unwrap_or(0) - in_deg.get(n).copied().unwrap_or(0)
            });
        if let Some(best) = best {
            active.remove(best);
            s1.push(best.to_string());
            for succ in ag.successors_of(best) {
                if active.contains(succ.as_str()) {
                    *in_deg.entry(succ.as_str()).or_insert(0) -= 1;
                }
            }
            for pred in ag.predecessors_of(best) {
                if active.contains(pred.as_str()) {
                    *out_deg.entry(pred.as_str()).or_insert(0) -= 1;
                }
            }
        }
    }

    s2.reverse();
    s1.extend(s2);
    s1
}

/// Reverse the edges that point backwards in the greedy-FAS ordering and drop
/// self loops. Reversed edges lose their port.
fn remove_cycles(ag: &AdjGraph) -> (AdjGraph, HashSet<(String, String)>) {
    let ordering = greedy_fas_ordering(ag);
    let position: HashMap<&str, usize> = ordering
        .iter()
        .enumerate()
        .map(|(i, n)| (n.as_str(), i))
        .collect();

    let mut reversed_edges: HashSet<(String, String)> = HashSet::new();
    let mut dag = AdjGraph::new();
    for node_id in &ag.nodes {
        dag.add_node(node_id);
    }
    for edge in &ag.edges {
        if edge.src == edge.tgt {
            continue;
        }
        let src_pos = position.get(edge.src.as_str()).copied().unwrap_or(0);
        let tgt_pos = position.get(edge.tgt.as_str()).copied().unwrap_or(0);
        if src_pos > tgt_pos {
            reversed_edges.insert((edge.src.clone(), edge.tgt.clone()));
            dag.add_edge(&edge.tgt, &edge.src, None);
        } else {
            dag.add_edge(&edge.src, &edge.tgt, edge.port);
        }
    }

    (dag, reversed_edges)
}

// ─── Layer Assignment ────────────────────────────────────────────────────────

pub struct LayerAssignment {
    pub layers: HashMap<String, usize>,
    pub layer_count: usize,
}

impl LayerAssignment {
    /// Longest-path layering, then every source is pulled down to sit one
    /// layer above its highest successor.
    fn assign(dag: &AdjGraph) -> Self {
        let mut layers: HashMap<String, usize> = dag.nodes.iter().map(|n| (n.clone(), 0)).collect();

        let mut changed = true;
        while changed {
            changed = false;
            for edge in &dag.edges {
                let src_layer = *layers.get(&edge.src).unwrap_or(&0);
                let tgt_layer = layers.entry(edge.tgt.clone()).or_insert(0);
                if *tgt_layer < src_layer + 1 {
                    *tgt_layer = src_layer + 1;
                    changed = true;
                }
            }
        }

        for node in &dag.nodes {
            if dag.in_degree(node) > 0 {
                continue;
            }
            let lowest = dag
                .successors_of(node)
                .iter()
                .filter_map(|s| layers.get(s).copied())
                .min();
            if let Some(lowest) = lowest {
                if lowest > 0 {
                    layers.insert(node.clone(), lowest - 1);
                }
            }
        }

        let layer_count = layers.values().copied().max().map(|m| m + 1).unwrap_or(1);
        Self {
            layers,
            layer_count,
        }
    }
}

// ─── Dummy Node Insertion ────────────────────────────────────────────────────

pub struct AugmentedGraph {
    ag: AdjGraph,
    layers: HashMap<String, usize>,
    layer_count: usize,
}

fn insert_dummy_nodes(dag: AdjGraph, la: LayerAssignment) -> AugmentedGraph {
    let mut new_ag = AdjGraph::new();
    for node_id in &dag.nodes {
        new_ag.add_node(node_id);
    }

    let mut layers = la.layers;
    for (edge_counter, edge) in dag.edges.iter().enumerate() {
        let src_layer = *layers.get(&edge.src).unwrap_or(&0);
        let tgt_layer = *layers.get(&edge.tgt).unwrap_or(&0);
        if tgt_layer <= src_layer + 1 {
            new_ag.add_edge(&edge.src, &edge.tgt, edge.port);
            continue;
        }

        let mut chain_prev = edge.src.clone();
        let mut port = edge.port;
        for i in 0..(tgt_layer - src_layer - 1) {
            let dummy_id = format!("{}{}_{}", DUMMY_PREFIX, edge_counter, i);
            new_ag.add_node(&dummy_id);
            layers.insert(dummy_id.clone(), src_layer + i + 1);
            new_ag.add_edge(&chain_prev, &dummy_id, port.take());
            chain_prev = dummy_id;
        }
        new_ag.add_edge(&chain_prev, &edge.tgt, None);
    }

    AugmentedGraph {
        ag: new_ag,
        layers,
        layer_count: la.layer_count,
    }
}

// ─── Crossing Minimization ───────────────────────────────────────────────────

/// Depth-first discovery rank from the sources, children visited in port
/// order then edge order. Keeps each parent's children contiguous and in
/// their given order.
fn model_order_ranks(ag: &AdjGraph) -> HashMap<String, usize> {
    let mut children: HashMap<&str, Vec<(usize, &str)>> = HashMap::new();
    for edge in &ag.edges {
        children
            .entry(edge.src.as_str())
            .or_default()
            .push((edge.port.unwrap_or(0), edge.tgt.as_str()));
    }
    for list in children.values_mut() {
        list.sort_by_key(|(port, _)| *port);
    }

    let mut rank: HashMap<String, usize> = HashMap::new();
    let roots = ag
        .nodes
        .iter()
        .filter(|n| ag.in_degree(n) == 0)
        .chain(ag.nodes.iter());
    for root in roots {
        if rank.contains_key(root) {
            continue;
        }
        let mut stack: Vec<&str> = vec![root.as_str()];
        while let Some(current) = stack.pop() {
            if rank.contains_key(current) {
                continue;
            }
            rank.insert(current.to_string(), rank.len());
            if let Some(list) = children.get(current) {
                for (_, child) in list.iter().rev() {
                    if !rank.contains_key(*child) {
                        stack.push(child);
                    }
                }
            }
        }
    }
    rank
}

fn port_offset(port: Option<usize>, count: usize) -> f64 {
    match port {
        Some(rank) => (rank as f64 + 1.0) / (count as f64 + 1.0) - 0.5,
        None => 0.0,
    }
}

fn count_crossings(ordering: &[Vec<String>], ag: &AdjGraph, info: &NodeInfo) -> usize {
    let mut total = 0usize;
    for l_idx in 0..ordering.len().saturating_sub(1) {
        let src_pos: HashMap<&str, usize> = ordering[l_idx]
            .iter()
            .enumerate()
            .map(|(i, nid)| (nid.as_str(), i))
            .collect();
        let tgt_pos: HashMap<&str, usize> = ordering[l_idx + 1]
            .iter()
            .enumerate()
            .map(|(i, nid)| (nid.as_str(), i))
            .collect();
        let mut edges: Vec<(f64, usize)> = Vec::new();
        for edge in &ag.edges {
            if let (Some(&sp), Some(&tp)) = (
                src_pos.get(edge.src.as_str()),
                tgt_pos.get(edge.tgt.as_str()),
            ) {
                let count = info.port_count.get(&edge.src).copied().unwrap_or(0);
                edges.push((sp as f64 + port_offset(edge.port, count), tp));
            }
        }
        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                let (ei0, ei1) = edges[i];
                let (ej0, ej1) = edges[j];
                if (ei0 < ej0 && ei1 > ej1) || (ei0 > ej0 && ei1 < ej1) {
                    total += 1;
                }
            }
        }
    }
    total
}

/// Reorder `layer` by the barycenter of its neighbours in `fixed`.
/// Nodes without neighbours there keep their current slot as barycenter.
fn sort_layer(
    layer: &mut Vec<String>,
    fixed: &[String],
    aug: &AugmentedGraph,
    info: &NodeInfo,
    incoming: bool,
) {
    let fixed_pos: HashMap<&str, f64> = fixed
        .iter()
        .enumerate()
        .map(|(i, n)| (n.as_str(), i as f64))
        .collect();

    let mut keyed: Vec<(f64, usize, String)> = Vec::with_capacity(layer.len());
    for (current, node) in layer.iter().enumerate() {
        let mut sum = 0.0;
        let mut count = 0usize;
        for edge in &aug.ag.edges {
            let (this, other) = if incoming {
                (&edge.tgt, &edge.src)
            } else {
                (&edge.src, &edge.tgt)
            };
            if this != node {
                continue;
            }
            let Some(&pos) = fixed_pos.get(other.as_str()) else {
                continue;
            };
            let offset = if incoming {
                let ports = info.port_count.get(&edge.src).copied().unwrap_or(0);
                port_offset(edge.port, ports)
            } else {
                0.0
            };
            sum += pos + offset;
            count += 1;
        }
        let bary = if count == 0 {
            current as f64
        } else {
            sum / count as f64
        };
        keyed.push((bary, current, node.clone()));
    }
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    *layer = keyed.into_iter().map(|(_, _, n)| n).collect();
}

fn minimise_crossings(aug: &AugmentedGraph, info: &NodeInfo, options: &LayoutOptions) -> Vec<Vec<String>> {
    let mut ordering: Vec<Vec<String>> = vec![Vec::new(); aug.layer_count];
    let ranks = model_order_ranks(&aug.ag);
    let mut nodes: Vec<&String> = aug.ag.nodes.iter().collect();
    if options.consider_model_order {
        nodes.sort_by_key(|n| ranks.get(*n).copied().unwrap_or(usize::MAX));
    } else {
        nodes.sort();
    }
    for node_id in nodes {
        let layer = *aug.layers.get(node_id).unwrap_or(&0);
        if layer < ordering.len() {
            ordering[layer].push(node_id.clone());
        }
    }

    let mut best = ordering.clone();
    let mut best_crossings = count_crossings(&ordering, &aug.ag, info);
    if best_crossings == 0 {
        return best;
    }

    for _pass in 0..options.ordering_passes {
        for layer_idx in 1..aug.layer_count {
            let fixed = ordering[layer_idx - 1].clone();
            sort_layer(&mut ordering[layer_idx], &fixed, aug, info, true);
        }
        for layer_idx in (0..aug.layer_count.saturating_sub(1)).rev() {
            let fixed = ordering[layer_idx + 1].clone();
            sort_layer(&mut ordering[layer_idx], &fixed, aug, info, false);
        }

        let crossings = count_crossings(&ordering, &aug.ag, info);
        if crossings >= best_crossings {
            break;
        }
        best_crossings = crossings;
        best = ordering.clone();
        if crossings == 0 {
            break;
        }
    }

    debug!(crossings = best_crossings, "crossing minimisation done");
    best
}

// ─── Coordinate Assignment ───────────────────────────────────────────────────

/// Least-squares non-decreasing fit (pool adjacent violators).
fn isotonic_fit(targets: &[f64]) -> Vec<f64> {
    let mut blocks: Vec<(f64, usize)> = Vec::with_capacity(targets.len());
    for &t in targets {
        blocks.push((t, 1));
        while blocks.len() >= 2 {
            let (s2, c2) = blocks[blocks.len() - 1];
            let (s1, c1) = blocks[blocks.len() - 2];
            if s1 / c1 as f64 <= s2 / c2 as f64 {
                break;
            }
            blocks.pop();
            let last = blocks.len() - 1;
            blocks[last] = (s1 + s2, c1 + c2);
        }
    }
    let mut out = Vec::with_capacity(targets.len());
    for (sum, count) in blocks {
        let mean = sum / count as f64;
        out.extend(std::iter::repeat_n(mean, count));
    }
    out
}

/// Closest placement to `desired` that keeps order and minimum separations.
fn place_layer(desired: &[f64], seps: &[f64]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(desired.len());
    let mut acc = 0.0;
    for i in 0..desired.len() {
        if i > 0 {
            acc += seps[i - 1];
        }
        offsets.push(acc);
    }
    let targets: Vec<f64> = desired.iter().zip(&offsets).map(|(d, o)| d - o).collect();
    isotonic_fit(&targets)
        .into_iter()
        .zip(&offsets)
        .map(|(y, o)| y + o)
        .collect()
}

fn assign_coordinates(
    ordering: &[Vec<String>],
    aug: &AugmentedGraph,
    info: &NodeInfo,
    options: &LayoutOptions,
) -> HashMap<String, Point> {
    let width = |id: &str| info.size(id).0;
    let separation = |a: &str, b: &str| {
        let gap = if NodeInfo::is_dummy(a) || NodeInfo::is_dummy(b) {
            options.edge_spacing
        } else {
            options.node_spacing
        };
        (width(a) + width(b)) / 2.0 + gap
    };
    let layer_seps: Vec<Vec<f64>> = ordering
        .iter()
        .map(|layer| layer.windows(2).map(|w| separation(&w[0], &w[1])).collect())
        .collect();

    let mut x: HashMap<String, f64> = HashMap::new();
    for (layer, seps) in ordering.iter().zip(&layer_seps) {
        let zeros = vec![0.0; layer.len()];
        for (node, pos) in layer.iter().zip(place_layer(&zeros, seps)) {
            x.insert(node.clone(), pos);
        }
    }

    if options.node_placement == NodePlacement::Balanced {
        for pass in 0..options.placement_passes {
            let downward = pass % 2 == 0;
            let layer_indices: Vec<usize> = if downward {
                (1..ordering.len()).collect()
            } else {
                (0..ordering.len().saturating_sub(1)).rev().collect()
            };
            for l in layer_indices {
                let desired: Vec<f64> = ordering[l]
                    .iter()
                    .map(|node| {
                        let neighbours = if downward {
                            aug.ag.predecessors_of(node)
                        } else {
                            aug.ag.successors_of(node)
                        };
                        desired_x(node, neighbours, &x, options)
                    })
                    .collect();
                for (node, pos) in ordering[l].iter().zip(place_layer(&desired, &layer_seps[l])) {
                    x.insert(node.clone(), pos);
                }
            }
        }
    }

    // Normalise so the leftmost box edge sits at 0.
    let min_left = x
        .iter()
        .map(|(id, cx)| cx - width(id) / 2.0)
        .fold(f64::INFINITY, f64::min);
    let shift = if min_left.is_finite() { -min_left } else { 0.0 };

    let mut layer_y: Vec<f64> = Vec::with_capacity(ordering.len());
    let mut top = 0.0;
    for (l, layer) in ordering.iter().enumerate() {
        if l > 0 {
            top += layer_gap(&ordering[l - 1], layer, options);
        }
        let height = layer
            .iter()
            .map(|id| info.size(id).1)
            .fold(0.0, f64::max);
        layer_y.push(top + height / 2.0);
        top += height;
    }
    let total = top;

    let mut positions: HashMap<String, Point> = HashMap::new();
    for (l, layer) in ordering.iter().enumerate() {
        for node in layer {
            if NodeInfo::is_dummy(node) {
                continue;
            }
            let cx = x.get(node).copied().unwrap_or(0.0) + shift;
            let cy = match options.direction {
                Direction::Down => layer_y[l],
                Direction::Up => total - layer_y[l],
            };
            positions.insert(node.clone(), Point::new(cx, cy));
        }
    }
    positions
}

/// Vertical gap between two adjacent layers. Edge segments passing through
/// either layer keep `edge_node_spacing` clear of the nodes around them.
fn layer_gap(upper: &[String], lower: &[String], options: &LayoutOptions) -> f64 {
    let has_real = |layer: &[String]| layer.iter().any(|id| !NodeInfo::is_dummy(id));
    let has_dummy = |layer: &[String]| layer.iter().any(|id| NodeInfo::is_dummy(id));
    let node_to_node = has_real(upper) && has_real(lower);
    let edge_to_node = has_dummy(upper) || has_dummy(lower);
    match (node_to_node, edge_to_node) {
        (true, true) => options.layer_spacing.max(options.edge_node_spacing),
        (true, false) => options.layer_spacing,
        (false, _) => options.edge_node_spacing,
    }
}

/// Centre of the neighbour span; a single neighbour gives a straight edge.
fn desired_x(
    node: &str,
    neighbours: &[String],
    x: &HashMap<String, f64>,
    options: &LayoutOptions,
) -> f64 {
    let current = x.get(node).copied().unwrap_or(0.0);
    let xs: Vec<f64> = neighbours.iter().filter_map(|n| x.get(n).copied()).collect();
    match xs.as_slice() {
        [] => current,
        [only] if options.improve_straightness => *only,
        _ => {
            let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (lo + hi) / 2.0
        }
    }
}

// ─── SugiyamaLayout Engine ───────────────────────────────────────────────────

/// Sugiyama layered layout engine.
pub struct SugiyamaLayout;

impl SugiyamaLayout {
    /// Run the full pipeline. Positions are node centres; dummies are omitted.
    pub fn run(graph: &LayoutGraph) -> Result<SolvedLayout, LayoutError> {
        let (ag, mut info) = resolve(graph)?;
        if ag.nodes.is_empty() {
            return Ok(SolvedLayout::default());
        }
        if graph.options.port_constraints == PortConstraints::Free {
            info.port_count.clear();
        }

        let (dag, reversed) = remove_cycles(&ag);
        if !reversed.is_empty() {
            debug!(reversed = reversed.len(), "reversed edges to break cycles");
        }
        let la = LayerAssignment::assign(&dag);
        let aug = insert_dummy_nodes(dag, la);
        let ordering = minimise_crossings(&aug, &info, &graph.options);
        let positions = assign_coordinates(&ordering, &aug, &info, &graph.options);
        debug!(
            nodes = positions.len(),
            layers = aug.layer_count,
            "layered layout solved"
        );
        Ok(SolvedLayout { positions })
    }
}

/// The bundled solver: runs [`SugiyamaLayout`] inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SugiyamaSolver;

#[async_trait]
impl LayoutSolver for SugiyamaSolver {
    async fn solve(&self, graph: &LayoutGraph) -> Result<SolvedLayout, LayoutError> {
        SugiyamaLayout::run(graph)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_sugiyama.rs"]
mod tests;
