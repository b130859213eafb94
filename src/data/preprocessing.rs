//! Data preprocessing module: splitting a graph into its connected pieces
//!
//! s-clubs never span two components of the input graph, so each component
//! can be clustered on its own.

use crate::cluster::connectivity::DisjointSets;
use crate::graph::CompressedGraph;
use std::collections::HashMap;

/// A component relabelled to `0..len`, with the map back to the parent graph
pub struct ComponentGraph {
    pub graph: CompressedGraph,
    /// `original[i]` is the parent-graph vertex of local vertex `i`
    pub original: Vec<u32>,
}

/// Connected components of the whole graph, each sorted, ordered by smallest vertex
pub fn connected_components(graph: &CompressedGraph) -> Vec<Vec<u32>> {
    let mut sets = DisjointSets::new(graph.node_count);
    for src in 0..graph.node_count {
        for &dst in graph.neighbors(src) {
            sets.union(src as u32, dst);
        }
    }

    let mut root_slot: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Vec<u32>> = Vec::new();
    for node in 0..graph.node_count as u32 {
        let root = sets.find(node);
        let slot = *root_slot.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(node);
    }
    components
}

/// Extract the subgraph induced by `vertices`, relabelled in the given order
pub fn extract_subgraph(graph: &CompressedGraph, vertices: &[u32]) -> CompressedGraph {
    let subgraph_size = vertices.len();

    // Create mapping from original to subgraph indices
    let mut orig_to_sub = vec![u32::MAX; graph.node_count];
    for (i, &vertex) in vertices.iter().enumerate() {
        orig_to_sub[vertex as usize] = i as u32;
    }

    // Count edges in the subgraph
    let edge_count: usize = vertices
        .iter()
        .map(|&v| {
            graph
                .neighbors(v as usize)
                .iter()
                .filter(|&&t| orig_to_sub[t as usize] != u32::MAX)
                .count()
        })
        .sum();

    let mut subgraph = CompressedGraph::with_capacity(subgraph_size, edge_count);

    // Fill offsets and edges
    subgraph.offsets.push(0);
    let mut offset = 0;

    for &vertex in vertices {
        let start = subgraph.edges.len();
        for &target in graph.neighbors(vertex as usize) {
            let local = orig_to_sub[target as usize];
            // Only include edges where both endpoints are in the subgraph
            if local != u32::MAX {
                subgraph.edges.push(local);
                offset += 1;
            }
        }
        subgraph.edges[start..].sort_unstable();
        subgraph.offsets.push(offset);
    }

    // Copy node IDs if available
    if let Some(node_ids) = &graph.node_ids {
        subgraph.node_ids = Some(
            vertices
                .iter()
                .map(|&v| node_ids[v as usize].clone())
                .collect(),
        );
    }

    subgraph
}

/// Split `graph` into one relabelled graph per connected component
pub fn split_components(graph: &CompressedGraph) -> Vec<ComponentGraph> {
    let pieces: Vec<ComponentGraph> = connected_components(graph)
        .into_iter()
        .map(|vertices| ComponentGraph {
            graph: extract_subgraph(graph, &vertices),
            original: vertices,
        })
        .collect();

    log::info!("Graph splits into {} connected components", pieces.len());
    pieces
}
