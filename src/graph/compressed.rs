//! Memory-efficient graph representation

use std::mem;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Serialize, Deserialize};

/// Compressed sparse representation of an undirected graph.
///
/// Every edge `{u, v}` is stored twice, once in each endpoint's neighbor list,
/// so the structure doubles as the symmetric directed view of the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's neighbors begin
    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub offsets: Vec<u32>,

    /// Neighbor array: concatenated, sorted neighbor lists
    pub edges: Vec<u32>,

    /// Optional mapping from internal node IDs to the labels used in the input file
    pub node_ids: Option<Vec<String>>,
}

impl CompressedGraph {
    /// Create a new graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count),
            node_ids: None,
        }
    }

    /// Get the neighbors of a node
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Degree of a node
    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Whether `vertex` names a node of this graph
    pub fn contains(&self, vertex: u32) -> bool {
        (vertex as usize) < self.node_count
    }

    /// Label of a node, falling back to its index
    pub fn label(&self, node: u32) -> String {
        self.node_ids
            .as_ref()
            .and_then(|ids| ids.get(node as usize).cloned())
            .unwrap_or_else(|| node.to_string())
    }

    /// Build the symmetric arc view used for shortest-path work.
    ///
    /// Node `i` of the result is vertex `i`; every edge becomes two arcs.
    pub fn to_arc_graph(&self) -> DiGraph<(), ()> {
        let mut arcs = DiGraph::with_capacity(self.node_count, self.edges.len());
        for _ in 0..self.node_count {
            arcs.add_node(());
        }
        for src in 0..self.node_count {
            for &dst in self.neighbors(src) {
                arcs.add_edge(NodeIndex::new(src), NodeIndex::new(dst as usize), ());
            }
        }
        arcs
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();

        let ids = self.node_ids.as_ref()
            .map(|ids| ids.iter().map(|s| s.capacity()).sum::<usize>())
            .unwrap_or(0);

        base + offsets + edges + ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn arc_graph_mirrors_every_edge() {
        let graph = GraphBuilder::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let arcs = graph.to_arc_graph();
        assert_eq!(arcs.node_count(), 3);
        assert_eq!(arcs.edge_count(), 4);
        assert!(arcs.find_edge(NodeIndex::new(2), NodeIndex::new(1)).is_some());
        assert!(arcs.find_edge(NodeIndex::new(0), NodeIndex::new(2)).is_none());
    }

    #[test]
    fn labels_fall_back_to_indices() {
        let mut graph = GraphBuilder::from_edges(2, &[(0, 1)]).unwrap();
        assert_eq!(graph.label(1), "1");
        graph.node_ids = Some(vec!["a".into(), "b".into()]);
        assert_eq!(graph.label(1), "b");
        assert!(graph.memory_usage() > 0);
    }
}
