//! Connectivity and diameter analysis of induced cluster subgraphs

use crate::graph::algorithms::{induced_bfs_distances, membership_mask};
use crate::graph::{CompressedGraph, Directedness};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Union-Find over dense indices `0..size`
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set (for union by size)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        if self.rank[root_x as usize] > self.rank[root_y as usize] {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += self.rank[root_y as usize];
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += self.rank[root_x as usize];
        }
    }
}

/// Outcome of analyzing one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Connectivity {
    /// The induced subgraph is connected.
    Connected { diameter: u32 },
    /// The induced subgraph falls apart. Each component is sorted, and
    /// components are ordered by their smallest vertex.
    Disconnected { components: Vec<Vec<u32>> },
}

impl Connectivity {
    /// Whether the cluster breaks an s-club bound of `bound`
    pub fn violates(&self, bound: u32) -> bool {
        match self {
            Connectivity::Connected { diameter } => *diameter > bound,
            Connectivity::Disconnected { .. } => true,
        }
    }
}

/// Decides connectivity and diameter of induced cluster subgraphs.
pub struct ConnectivityAnalyzer<'g> {
    graph: &'g CompressedGraph,
    directedness: Directedness,
}

impl<'g> ConnectivityAnalyzer<'g> {
    pub fn new(graph: &'g CompressedGraph, directedness: Directedness) -> Self {
        Self { graph, directedness }
    }

    /// Analyze the subgraph induced by `members`.
    ///
    /// Empty and singleton clusters are connected with diameter 0.
    pub fn analyze(&self, members: &[u32]) -> Connectivity {
        if members.len() <= 1 {
            return Connectivity::Connected { diameter: 0 };
        }

        let mut sorted = members.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let components = match self.directedness {
            Directedness::Undirected => self.union_find_components(&sorted),
            Directedness::Symmetric => self.strong_components(&sorted),
        };

        if components.len() > 1 {
            log::debug!(
                "Cluster of {} vertices splits into {} components",
                sorted.len(),
                components.len()
            );
            return Connectivity::Disconnected { components };
        }

        Connectivity::Connected {
            diameter: self.diameter(&sorted),
        }
    }

    fn union_find_components(&self, sorted: &[u32]) -> Vec<Vec<u32>> {
        let position: HashMap<u32, u32> = sorted
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i as u32))
            .collect();

        let mut sets = DisjointSets::new(sorted.len());
        for (i, &v) in sorted.iter().enumerate() {
            for neighbor in self.graph.neighbors(v as usize) {
                if let Some(&j) = position.get(neighbor) {
                    sets.union(i as u32, j);
                }
            }
        }

        // Members are visited in ascending order, so components come out
        // sorted and ordered by their smallest vertex.
        let mut root_slot: HashMap<u32, usize> = HashMap::new();
        let mut components: Vec<Vec<u32>> = Vec::new();
        for (i, &v) in sorted.iter().enumerate() {
            let root = sets.find(i as u32);
            let slot = *root_slot.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(v);
        }
        components
    }

    fn strong_components(&self, sorted: &[u32]) -> Vec<Vec<u32>> {
        let mut local: HashMap<u32, NodeIndex> = HashMap::with_capacity(sorted.len());
        let mut arcs: DiGraph<u32, ()> = DiGraph::with_capacity(sorted.len(), 0);
        for &v in sorted {
            local.insert(v, arcs.add_node(v));
        }
        for &v in sorted {
            for neighbor in self.graph.neighbors(v as usize) {
                if let Some(&target) = local.get(neighbor) {
                    arcs.add_edge(local[&v], target, ());
                }
            }
        }

        let mut components: Vec<Vec<u32>> = tarjan_scc(&arcs)
            .into_iter()
            .map(|scc| {
                let mut component: Vec<u32> = scc.into_iter().map(|idx| arcs[idx]).collect();
                component.sort_unstable();
                component
            })
            .collect();
        components.sort_unstable_by_key(|component| component[0]);
        components
    }

    /// Largest induced distance between two members of a connected cluster
    fn diameter(&self, sorted: &[u32]) -> u32 {
        let mask = membership_mask(self.graph.node_count, sorted);
        sorted
            .iter()
            .map(|&source| {
                let distances = induced_bfs_distances(self.graph, source, &mask);
                sorted
                    .iter()
                    .filter_map(|&v| distances[v as usize])
                    .max()
                    .unwrap_or(0)
            })
            .max()
            .unwrap_or(0)
    }
}
