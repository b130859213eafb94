//! Unit-weight traversal algorithms

use crate::graph::CompressedGraph;
use std::collections::VecDeque;

/// Single-source BFS distances over the whole graph.
///
/// `None` marks vertices unreachable from `source`.
pub fn bfs_distances(graph: &CompressedGraph, source: u32) -> Vec<Option<u32>> {
    let mut distances = vec![None; graph.node_count];
    distances[source as usize] = Some(0);

    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        let next = distances[node as usize].map_or(0, |d| d + 1);
        for &neighbor in graph.neighbors(node as usize) {
            let slot = &mut distances[neighbor as usize];
            if slot.is_none() {
                *slot = Some(next);
                queue.push_back(neighbor);
            }
        }
    }

    distances
}

/// BFS distances inside the subgraph induced by `in_cluster`.
///
/// `source` must itself be a member; non-members stay `None`.
pub fn induced_bfs_distances(
    graph: &CompressedGraph,
    source: u32,
    in_cluster: &[bool],
) -> Vec<Option<u32>> {
    let mut distances = vec![None; graph.node_count];
    distances[source as usize] = Some(0);

    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        let next = distances[node as usize].map_or(0, |d| d + 1);
        for &neighbor in graph.neighbors(node as usize) {
            if !in_cluster[neighbor as usize] {
                continue;
            }
            let slot = &mut distances[neighbor as usize];
            if slot.is_none() {
                *slot = Some(next);
                queue.push_back(neighbor);
            }
        }
    }

    distances
}

/// Membership mask for a vertex list
pub fn membership_mask(node_count: usize, members: &[u32]) -> Vec<bool> {
    let mut mask = vec![false; node_count];
    for &member in members {
        mask[member as usize] = true;
    }
    mask
}

/// Member pairs `(a, b)`, `a < b`, whose induced distance exceeds `bound`.
///
/// Pairs that are unreachable from each other inside the cluster are included.
/// The result is sorted lexicographically.
pub fn far_pairs(
    graph: &CompressedGraph,
    members: &[u32],
    in_cluster: &[bool],
    bound: u32,
) -> Vec<(u32, u32)> {
    let mut sorted = members.to_vec();
    sorted.sort_unstable();

    let mut pairs = Vec::new();
    for (i, &a) in sorted.iter().enumerate() {
        let distances = induced_bfs_distances(graph, a, in_cluster);
        for &b in &sorted[i + 1..] {
            if distances[b as usize].map_or(true, |d| d > bound) {
                pairs.push((a, b));
            }
        }
    }

    log::trace!("{} member pairs farther apart than {}", pairs.len(), bound);
    pairs
}
