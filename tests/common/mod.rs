//! Graph fixtures and an independent distance oracle shared by the
//! integration suites.

#![allow(dead_code)]

use sclub_separator::cluster::Cluster;
use sclub_separator::graph::{CompressedGraph, GraphBuilder};
use sclub_separator::{
    FormulationMode, Inequality, OracleConfig, SearchContext, SeparationOracle, SeparationReport,
    SolutionSnapshot,
};
use std::collections::{HashSet, VecDeque};

pub fn path(n: u32) -> CompressedGraph {
    let edges: Vec<(u32, u32)> = (1..n).map(|v| (v - 1, v)).collect();
    GraphBuilder::from_edges(n as usize, &edges).unwrap()
}

pub fn cycle(n: u32) -> CompressedGraph {
    let edges: Vec<(u32, u32)> = (0..n).map(|v| (v, (v + 1) % n)).collect();
    GraphBuilder::from_edges(n as usize, &edges).unwrap()
}

pub fn complete(n: u32) -> CompressedGraph {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in u + 1..n {
            edges.push((u, v));
        }
    }
    GraphBuilder::from_edges(n as usize, &edges).unwrap()
}

/// `rows x cols` grid, vertex `r * cols + c`
pub fn grid(rows: u32, cols: u32) -> CompressedGraph {
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let v = r * cols + c;
            if c + 1 < cols {
                edges.push((v, v + 1));
            }
            if r + 1 < rows {
                edges.push((v, v + cols));
            }
        }
    }
    GraphBuilder::from_edges((rows * cols) as usize, &edges).unwrap()
}

pub fn labeling(bound: u32, max_clusters: usize) -> OracleConfig {
    OracleConfig {
        diameter_bound: bound,
        mode: FormulationMode::Labeling { max_clusters },
        ..OracleConfig::default()
    }
}

/// Run one sequential oracle pass over a label-indexed candidate
pub fn separate_labels(
    context: &SearchContext,
    clusters: Vec<Vec<u32>>,
) -> (SeparationReport, Vec<Inequality>) {
    let snapshot = SolutionSnapshot::from_labels(&Cluster::from_member_lists(clusters));
    let mut cuts = Vec::new();
    let report = SeparationOracle::new(context)
        .separate(&snapshot, &mut cuts)
        .unwrap();
    (report, cuts)
}

/// BFS distance from `a` to `b` that never enters a vertex of `blocked`
pub fn distance_avoiding(
    graph: &CompressedGraph,
    a: u32,
    b: u32,
    blocked: &HashSet<u32>,
) -> Option<u32> {
    let mut distances = vec![None; graph.node_count];
    distances[a as usize] = Some(0u32);
    let mut queue = VecDeque::from([a]);
    while let Some(node) = queue.pop_front() {
        if node == b {
            return distances[node as usize];
        }
        let next = distances[node as usize].unwrap_or(0) + 1;
        for &neighbor in graph.neighbors(node as usize) {
            if blocked.contains(&neighbor) || distances[neighbor as usize].is_some() {
                continue;
            }
            distances[neighbor as usize] = Some(next);
            queue.push_back(neighbor);
        }
    }
    None
}

/// Largest distance inside the subgraph induced by `members`, `None` when
/// it is disconnected
pub fn induced_diameter(graph: &CompressedGraph, members: &[u32]) -> Option<u32> {
    let outside: HashSet<u32> = (0..graph.node_count as u32)
        .filter(|v| !members.contains(v))
        .collect();
    let mut diameter = 0;
    for &a in members {
        for &b in members {
            diameter = diameter.max(distance_avoiding(graph, a, b, &outside)?);
        }
    }
    Some(diameter)
}
