//! Post-processing of solver positions.
//!
//! Passes, in order:
//!   1. Mirror correction for configured `(left, right)` union pairs
//!   2. Sibling realignment of tagged collateral unions by birth order
//!   3. Overlap resolution, one sweep per configured gap
//!
//! Every pass moves whole subtrees so a branch's internal layout survives.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::graph::ForwardGraph;
use super::types::Positions;
use crate::config::OverlapConfig;
use crate::window::rules::PedigreeRules;
use crate::window::types::WindowedGraph;

/// Sibling-realignment deltas below this are treated as noise.
const MIN_REALIGN_DELTA: f64 = 1.0;

/// Run all three passes over `positions`.
pub fn correct(
    positions: &mut Positions,
    graph: &WindowedGraph,
    rules: &PedigreeRules,
    overlap: &OverlapConfig,
) {
    let forward = ForwardGraph::from_window(graph);
    mirror_correction(positions, &forward, rules);
    realign_siblings(positions, graph, &forward);
    for &gap in &overlap.gaps {
        resolve_overlaps(positions, graph, &forward, gap, overlap.bucket_height);
    }
}

/// Add `dx` to the x of `start` and everything reachable from it.
pub fn shift_subtree(positions: &mut Positions, forward: &ForwardGraph, start: &str, dx: f64) {
    for id in forward.subtree(start) {
        if let Some(p) = positions.get_mut(&id) {
            p.x += dx;
        }
    }
}

/// Swap the subtrees of each mirror pair whose right member sits left of the left one.
pub fn mirror_correction(positions: &mut Positions, forward: &ForwardGraph, rules: &PedigreeRules) {
    for (left, right) in rules.mirror_pairs() {
        let (Some(lp), Some(rp)) = (positions.get(&left).copied(), positions.get(&right).copied())
        else {
            continue;
        };
        if lp.x <= rp.x {
            continue;
        }
        let left_tree = forward.subtree(&left);
        let right_tree = forward.subtree(&right);
        let dx = rp.x - lp.x;
        for id in &left_tree {
            if let Some(p) = positions.get_mut(id) {
                p.x += dx;
            }
        }
        for id in &right_tree {
            if let Some(p) = positions.get_mut(id) {
                p.x -= dx;
            }
        }
        debug!(left = %left, right = %right, dx, "mirrored subtrees");
    }
}

/// Permute the x slots of each sibling group so birth order reads left to right.
pub fn realign_siblings(positions: &mut Positions, graph: &WindowedGraph, forward: &ForwardGraph) {
    let mut groups: BTreeMap<&str, Vec<(usize, &str)>> = BTreeMap::new();
    for node in &graph.nodes {
        if let Some(tag) = node.sibling_tag() {
            if positions.contains_key(&node.id) {
                groups
                    .entry(tag.sibling_parent_id.as_str())
                    .or_default()
                    .push((tag.sibling_order, node.id.as_str()));
            }
        }
    }

    for (parent, mut members) in groups {
        if members.len() < 2 {
            continue;
        }
        let mut slots: Vec<f64> = members
            .iter()
            .filter_map(|(_, id)| positions.get(*id).map(|p| p.x))
            .collect();
        slots.sort_by(f64::total_cmp);
        members.sort_by_key(|(order, _)| *order);

        let deltas: Vec<(&str, f64)> = members
            .iter()
            .zip(&slots)
            .filter_map(|((_, id), slot)| positions.get(*id).map(|p| (*id, slot - p.x)))
            .collect();
        for (id, dx) in deltas {
            if dx.abs() < MIN_REALIGN_DELTA {
                continue;
            }
            shift_subtree(positions, forward, id, dx);
        }
        debug!(parent = %parent, "sibling group realigned");
    }
}

/// Sweep each y bucket left to right and push crowded subtrees right until
/// neighbouring boxes are at least `gap` apart.
///
/// Buckets are swept ancestors first (by shallowest member depth, then y), so
/// a later shift never drags an already-swept row. With cyclic edges the
/// sweep falls back to plain top-down order.
pub fn resolve_overlaps(
    positions: &mut Positions,
    graph: &WindowedGraph,
    forward: &ForwardGraph,
    gap: f64,
    bucket_height: f64,
) {
    let bucket_height = if bucket_height > 0.0 { bucket_height } else { 1.0 };
    let widths: HashMap<&str, f64> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.size.width))
        .collect();

    let mut buckets: BTreeMap<i64, Vec<&str>> = BTreeMap::new();
    for node in &graph.nodes {
        if let Some(p) = positions.get(&node.id) {
            let key = (p.y / bucket_height).round() as i64;
            buckets.entry(key).or_default().push(node.id.as_str());
        }
    }

    let depths = forward.depths().unwrap_or_default();
    let mut rows: Vec<(usize, i64, Vec<&str>)> = buckets
        .into_iter()
        .map(|(key, members)| {
            let depth = members
                .iter()
                .filter_map(|id| depths.get(*id).copied())
                .min()
                .unwrap_or(usize::MAX);
            (depth, key, members)
        })
        .collect();
    rows.sort_by_key(|(depth, key, _)| (*depth, *key));

    let mut shifted = 0usize;
    for (_, _, mut members) in rows {
        members.sort_by(|a, b| {
            let ax = positions.get(*a).map_or(0.0, |p| p.x);
            let bx = positions.get(*b).map_or(0.0, |p| p.x);
            ax.total_cmp(&bx)
        });

        let mut last_right: Option<f64> = None;
        for id in members {
            let half = widths.get(id).copied().unwrap_or(0.0) / 2.0;
            let Some(x) = positions.get(id).map(|p| p.x) else {
                continue;
            };
            let mut left = x - half;
            if let Some(prev) = last_right {
                let deficit = prev + gap - left;
                if deficit > 0.0 {
                    shift_subtree(positions, forward, id, deficit);
                    left += deficit;
                    shifted += 1;
                }
            }
            let right = left + 2.0 * half;
            last_right = Some(last_right.map_or(right, |prev| prev.max(right)));
        }
    }
    debug!(gap, shifted, "overlap sweep done");
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_postprocess.rs"]
mod tests;
