//! Candidate cluster assignments stored as JSON

use anyhow::{anyhow, bail, Context, Result};
use crate::cluster::Cluster;
use crate::separation::{FormulationMode, SolutionSnapshot};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `{"clusters": [[0, 1], [2, 3]], "centers": [0, 3]}`
///
/// `centers` is only needed by the centering formulation; cluster `i` is then
/// indexed by `centers[i]` instead of `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentFile {
    pub clusters: Vec<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centers: Option<Vec<u32>>,
}

impl AssignmentFile {
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Reading assignment file: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let assignment: Self = serde_json::from_str(text)?;
        if let Some(centers) = &assignment.centers {
            if centers.len() != assignment.clusters.len() {
                bail!(
                    "{} centers given for {} clusters",
                    centers.len(),
                    assignment.clusters.len()
                );
            }
        }
        Ok(assignment)
    }

    /// Clusters labelled by position, or by center when centers are present.
    ///
    /// A center always belongs to its own cluster, listed or not.
    pub fn clusters(&self) -> Vec<Cluster> {
        match &self.centers {
            Some(centers) => centers
                .iter()
                .zip(&self.clusters)
                .map(|(&center, members)| {
                    let mut members = members.clone();
                    if !members.contains(&center) {
                        members.push(center);
                    }
                    Cluster::new(center, members)
                })
                .collect(),
            None => Cluster::from_member_lists(self.clusters.clone()),
        }
    }

    /// Engine-style candidate for `mode`
    pub fn snapshot(&self, mode: &FormulationMode) -> Result<SolutionSnapshot> {
        match mode {
            FormulationMode::Centering => {
                if self.centers.is_none() {
                    return Err(anyhow!("the centering formulation needs a center per cluster"));
                }
                Ok(SolutionSnapshot::from_centers(&self.clusters()))
            }
            _ => Ok(SolutionSnapshot::from_labels(&Cluster::from_member_lists(
                self.clusters.clone(),
            ))),
        }
    }
}
