//! Blocked-vertex weight overlay for length-bounded separation
//!
//! The overlay never touches the topology it is evaluated against: blocking a
//! vertex only changes the weight the overlay reports for arcs around it.

use petgraph::algo::dijkstra;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

/// How cluster connectivity and blocking are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directedness {
    /// Plain undirected connectivity; a blocked vertex penalizes every incident edge.
    #[default]
    Undirected,
    /// Strong connectivity over the symmetrized arc view; a blocked vertex
    /// penalizes only the arcs leaving it.
    Symmetric,
}

/// Per-call arc weights: 1 normally, `bound + 1` around blocked vertices.
#[derive(Debug, Clone)]
pub struct BlockedOverlay {
    blocked: Vec<bool>,
    bound: u32,
    directedness: Directedness,
}

impl BlockedOverlay {
    /// Overlay over `node_count` vertices with nothing blocked
    pub fn new(node_count: usize, bound: u32, directedness: Directedness) -> Self {
        Self {
            blocked: vec![false; node_count],
            bound,
            directedness,
        }
    }

    /// Overlay with every vertex of `vertices` blocked
    pub fn blocking(
        node_count: usize,
        bound: u32,
        directedness: Directedness,
        vertices: &[u32],
    ) -> Self {
        let mut overlay = Self::new(node_count, bound, directedness);
        for &vertex in vertices {
            overlay.block(vertex);
        }
        overlay
    }

    pub fn block(&mut self, vertex: u32) {
        self.blocked[vertex as usize] = true;
    }

    pub fn unblock(&mut self, vertex: u32) {
        self.blocked[vertex as usize] = false;
    }

    /// Weight of the arc `src -> dst`.
    ///
    /// Costs are `u64`, so `bound + 1` cannot overflow for any `u32` bound.
    pub fn arc_weight(&self, src: usize, dst: usize) -> u64 {
        let penalized = match self.directedness {
            Directedness::Undirected => self.blocked[src] || self.blocked[dst],
            Directedness::Symmetric => self.blocked[src],
        };
        if penalized {
            u64::from(self.bound) + 1
        } else {
            1
        }
    }

    /// Weighted shortest-path distance from `from` to `to` under this overlay.
    ///
    /// `None` means `to` is unreachable in the topology at all.
    pub fn distance(&self, arcs: &DiGraph<(), ()>, from: u32, to: u32) -> Option<u64> {
        let goal = NodeIndex::new(to as usize);
        let distances = dijkstra(arcs, NodeIndex::new(from as usize), Some(goal), |edge| {
            self.arc_weight(edge.source().index(), edge.target().index())
        });
        distances.get(&goal).copied()
    }

    /// Whether every `from`–`to` path is longer than the bound
    pub fn separates(&self, arcs: &DiGraph<(), ()>, from: u32, to: u32) -> bool {
        self.distance(arcs, from, to).map_or(true, |d| d > u64::from(self.bound))
    }
}
