//! Feasibility checks for finished s-club partitions and covers

use crate::cluster::connectivity::{Connectivity, ConnectivityAnalyzer};
use crate::cluster::Cluster;
use crate::graph::{CompressedGraph, Directedness};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Which clustering problem a solution answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
    /// Every vertex in exactly one cluster
    #[default]
    Partitioning,
    /// Every vertex in at least one cluster
    Covering,
}

/// Why a cluster fails to be an s-club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterDefect {
    Disconnected { cluster: u32, components: usize },
    DiameterExceeded { cluster: u32, diameter: u32 },
}

/// Result of checking a complete solution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionCheck {
    /// Vertices not covered by any cluster
    pub uncovered: Vec<u32>,
    /// Vertices assigned more than once (partitioning only)
    pub repeated: Vec<u32>,
    /// Vertices outside the graph
    pub unknown: Vec<u32>,
    /// Clusters that are not s-clubs
    pub defects: Vec<ClusterDefect>,
}

impl SolutionCheck {
    pub fn is_valid(&self) -> bool {
        self.uncovered.is_empty()
            && self.repeated.is_empty()
            && self.unknown.is_empty()
            && self.defects.is_empty()
    }
}

/// Check whether `clusters` is a valid s-club partition or cover of `graph`
pub fn check_solution(
    graph: &CompressedGraph,
    bound: u32,
    clusters: &[Cluster],
    problem: Problem,
) -> SolutionCheck {
    let mut check = SolutionCheck::default();
    let mut seen = vec![0u32; graph.node_count];

    for cluster in clusters {
        for &member in &cluster.members {
            if !graph.contains(member) {
                check.unknown.push(member);
                continue;
            }
            seen[member as usize] += 1;
        }
    }

    for (vertex, &count) in seen.iter().enumerate() {
        if count == 0 {
            check.uncovered.push(vertex as u32);
        } else if count > 1 && problem == Problem::Partitioning {
            check.repeated.push(vertex as u32);
        }
    }

    let analyzer = ConnectivityAnalyzer::new(graph, Directedness::Undirected);
    for cluster in clusters {
        let members: Vec<u32> = cluster
            .members
            .iter()
            .copied()
            .filter(|&v| graph.contains(v))
            .sorted_unstable()
            .dedup()
            .collect();
        let connectivity = analyzer.analyze(&members);
        if !connectivity.violates(bound) {
            continue;
        }
        check.defects.push(match connectivity {
            Connectivity::Disconnected { components } => ClusterDefect::Disconnected {
                cluster: cluster.id,
                components: components.len(),
            },
            Connectivity::Connected { diameter } => ClusterDefect::DiameterExceeded {
                cluster: cluster.id,
                diameter,
            },
        });
    }

    log::info!(
        "Solution check: {} clusters, {} defects, valid = {}",
        clusters.len(),
        check.defects.len(),
        check.is_valid()
    );

    check
}
