//! Cluster analysis module

pub mod connectivity;
pub mod validation;

use serde::{Serialize, Deserialize};

pub use connectivity::{Connectivity, ConnectivityAnalyzer};
pub use validation::{check_solution, Problem, SolutionCheck};

/// A cluster of vertices in a candidate or final solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster label (column index in labeling formulations, center vertex
    /// in the centering formulation)
    pub id: u32,

    /// Members of this cluster (node indices)
    pub members: Vec<u32>,
}

impl Cluster {
    pub fn new(id: u32, members: Vec<u32>) -> Self {
        Self { id, members }
    }

    /// Label clusters 0, 1, ... in list order
    pub fn from_member_lists(lists: Vec<Vec<u32>>) -> Vec<Cluster> {
        lists
            .into_iter()
            .enumerate()
            .map(|(id, members)| Cluster::new(id as u32, members))
            .collect()
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }
}
