//! Graph construction module

use crate::error::SeparationError;
use crate::graph::CompressedGraph;
use std::collections::HashMap;

/// Builder for incrementally constructing an undirected CompressedGraph
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs, only tracked for graphs built from labels
    node_ids: Vec<String>,

    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
        }
    }

    /// Create a builder with `node_count` unlabeled nodes 0..node_count
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            node_count,
            id_to_index: HashMap::new(),
            node_ids: Vec::new(),
            adjacency_lists: vec![Vec::new(); node_count],
        }
    }

    /// Build a graph on `node_count` vertices from an index edge list
    pub fn from_edges(
        node_count: usize,
        edges: &[(u32, u32)],
    ) -> Result<CompressedGraph, SeparationError> {
        let mut builder = Self::with_nodes(node_count);
        for &(u, v) in edges {
            builder.add_edge(u, v)?;
        }
        Ok(builder.build())
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        // Create a new node
        let idx = self.node_count as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());
        self.node_count += 1;

        idx
    }

    /// Add an undirected edge between two labeled nodes
    pub fn add_labeled_edge(&mut self, src_id: &str, dst_id: &str) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.link(src_idx, dst_idx);
    }

    /// Add an undirected edge between two existing node indices
    pub fn add_edge(&mut self, src: u32, dst: u32) -> Result<(), SeparationError> {
        for vertex in [src, dst] {
            if vertex as usize >= self.node_count {
                return Err(SeparationError::VertexOutOfRange {
                    vertex,
                    node_count: self.node_count,
                });
            }
        }
        self.link(src, dst);
        Ok(())
    }

    fn link(&mut self, src: u32, dst: u32) {
        // Self loops never shorten a path
        if src == dst {
            return;
        }
        self.adjacency_lists[src as usize].push(dst);
        self.adjacency_lists[dst as usize].push(src);
    }

    /// Build the compressed graph
    pub fn build(mut self) -> CompressedGraph {
        // Sort for binary search efficiency, drop parallel edges
        for list in &mut self.adjacency_lists {
            list.sort_unstable();
            list.dedup();
        }

        let edge_count: usize = self.adjacency_lists.iter()
            .map(|list| list.len())
            .sum();

        let mut graph = CompressedGraph::with_capacity(self.node_count, edge_count);

        // Create offsets array
        graph.offsets.push(0);
        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            graph.offsets.push(offset);
        }

        for list in &self.adjacency_lists {
            graph.edges.extend_from_slice(list);
        }

        if !self.node_ids.is_empty() {
            graph.node_ids = Some(self.node_ids);
        }

        graph
    }
}
