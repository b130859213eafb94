//! Reduction of vertex separators to inclusion-minimal length-s separators

use crate::graph::algorithms::bfs_distances;
use crate::graph::{BlockedOverlay, CompressedGraph, Directedness};
use petgraph::graph::DiGraph;
use std::collections::HashMap;

/// Shrinks separators against a fixed diameter bound.
///
/// Holds only borrowed topology; every reduction builds and drops its own
/// overlay.
pub struct LengthBoundedReducer<'g> {
    graph: &'g CompressedGraph,
    arcs: &'g DiGraph<(), ()>,
    bound: u32,
    directedness: Directedness,
}

impl<'g> LengthBoundedReducer<'g> {
    pub fn new(
        graph: &'g CompressedGraph,
        arcs: &'g DiGraph<(), ()>,
        bound: u32,
        directedness: Directedness,
    ) -> Self {
        Self { graph, arcs, bound, directedness }
    }

    /// Drop every member of `candidate` not needed to keep `a` and `b` more
    /// than `bound` apart.
    ///
    /// Members are tried in the given order. Each is unblocked and the a–b
    /// distance recomputed; it stays dropped if the distance still exceeds the
    /// bound, otherwise it is blocked again. The survivors keep their order.
    pub fn minimize(&self, candidate: &[u32], a: u32, b: u32) -> Vec<u32> {
        let mut overlay =
            BlockedOverlay::blocking(self.graph.node_count, self.bound, self.directedness, candidate);

        let mut kept = Vec::with_capacity(candidate.len());
        for &vertex in candidate {
            overlay.unblock(vertex);
            if overlay.separates(self.arcs, a, b) {
                log::trace!("Vertex {} is redundant for ({}, {})", vertex, a, b);
            } else {
                overlay.block(vertex);
                kept.push(vertex);
            }
        }

        kept
    }

    /// Initial separator for two members of a connected cluster that are too
    /// far apart inside it: every vertex outside the cluster that could still
    /// lie on an a–b path of length at most `bound`.
    pub fn too_far_candidates(
        &self,
        in_cluster: &[bool],
        a: u32,
        b: u32,
        distances: &mut DistanceCache<'_>,
    ) -> Vec<u32> {
        let from_a = distances.row(a).to_vec();
        let from_b = distances.row(b);

        (0..self.graph.node_count as u32)
            .filter(|&v| !in_cluster[v as usize])
            .filter(|&v| match (from_a[v as usize], from_b[v as usize]) {
                (Some(da), Some(db)) => da + db <= self.bound,
                _ => false,
            })
            .collect()
    }

    /// Minimal separator for a too-far pair
    pub fn too_far_separator(
        &self,
        in_cluster: &[bool],
        a: u32,
        b: u32,
        distances: &mut DistanceCache<'_>,
    ) -> Vec<u32> {
        let candidate = self.too_far_candidates(in_cluster, a, b, distances);
        self.minimize(&candidate, a, b)
    }
}

/// Unit-weight BFS rows over the whole graph, computed on first use.
///
/// Scoped to a single cluster scan.
pub struct DistanceCache<'g> {
    graph: &'g CompressedGraph,
    rows: HashMap<u32, Vec<Option<u32>>>,
}

impl<'g> DistanceCache<'g> {
    pub fn new(graph: &'g CompressedGraph) -> Self {
        Self { graph, rows: HashMap::new() }
    }

    pub fn row(&mut self, source: u32) -> &[Option<u32>] {
        let graph = self.graph;
        self.rows
            .entry(source)
            .or_insert_with(|| bfs_distances(graph, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::algorithms::membership_mask;
    use crate::graph::GraphBuilder;

    fn cycle6() -> CompressedGraph {
        GraphBuilder::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]).unwrap()
    }

    #[test]
    fn redundant_members_are_dropped() {
        let graph = GraphBuilder::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let arcs = graph.to_arc_graph();

        // 0 and 4 are four hops apart, so with s = 3 nothing needs blocking
        let reducer = LengthBoundedReducer::new(&graph, &arcs, 3, Directedness::Undirected);
        assert!(reducer.minimize(&[1, 2, 3], 0, 4).is_empty());

        // With s = 4 one blocked vertex is enough; the first two are redundant
        let reducer = LengthBoundedReducer::new(&graph, &arcs, 4, Directedness::Undirected);
        assert_eq!(reducer.minimize(&[1, 2, 3], 0, 4), vec![3]);
    }

    #[test]
    fn too_far_filter_keeps_only_short_detours() {
        let graph = cycle6();
        let arcs = graph.to_arc_graph();
        let reducer = LengthBoundedReducer::new(&graph, &arcs, 2, Directedness::Undirected);
        let mask = membership_mask(6, &[0, 1, 2, 3, 4]);
        let mut cache = DistanceCache::new(&graph);

        assert_eq!(reducer.too_far_candidates(&mask, 0, 4, &mut cache), vec![5]);
        assert!(reducer.too_far_candidates(&mask, 0, 3, &mut cache).is_empty());
        assert_eq!(reducer.too_far_separator(&mask, 0, 4, &mut cache), vec![5]);
    }

    #[test]
    fn symmetric_blocking_reduces_identically() {
        let graph = cycle6();
        let arcs = graph.to_arc_graph();
        let undirected = LengthBoundedReducer::new(&graph, &arcs, 3, Directedness::Undirected);
        let symmetric = LengthBoundedReducer::new(&graph, &arcs, 3, Directedness::Symmetric);
        assert_eq!(
            undirected.minimize(&[1, 2, 4, 5], 0, 3),
            symmetric.minimize(&[1, 2, 4, 5], 0, 3)
        );
    }
}
