//! Formulation modes: which clusters to scan and how to phrase their cuts
//!
//! Every mode shares the same separator and minimality code. A mode only
//! decides the iteration domain, whether a cluster index is in use, which
//! vertex anchors a disconnected scan, and the shape of the emitted cut.

use crate::error::SeparationError;
use crate::separation::inequality::{Inequality, Variable};
use crate::separation::solution::CandidateSolution;
use crate::separation::{Violation, ViolationKind};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The formulation the oracle is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormulationMode {
    /// Label-indexed clusters `0..max_clusters` with activity indicators `y[j]`.
    Labeling { max_clusters: usize },
    /// Label-indexed clusters with the cluster count fixed to `clusters`.
    RestrictedLabeling { clusters: usize },
    /// Center-indexed clusters: cluster `b` exists when `x[b, b]` is set.
    Centering,
    /// Only the supplied labels out of `max_clusters` are scanned.
    Subset { labels: Vec<u32>, max_clusters: usize },
}

impl Default for FormulationMode {
    fn default() -> Self {
        FormulationMode::Labeling { max_clusters: 1 }
    }
}

/// How the anchor vertex `b` of a disconnected cluster is picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRule {
    /// First vertex of the smallest component
    SmallestComponent,
    /// A fixed vertex, the cluster's center
    Fixed(u32),
}

impl FormulationMode {
    /// Short name used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            FormulationMode::Labeling { .. } => "labeling",
            FormulationMode::RestrictedLabeling { .. } => "restricted_labeling",
            FormulationMode::Centering => "centering",
            FormulationMode::Subset { .. } => "subset",
        }
    }

    /// Check the mode against a graph of `node_count` vertices
    pub fn validate(&self, node_count: usize) -> Result<(), SeparationError> {
        if let FormulationMode::Subset { labels, max_clusters } = self {
            if let Some(&label) = labels.iter().find(|&&l| l as usize >= *max_clusters) {
                return Err(SeparationError::LabelOutOfRange {
                    label,
                    available: *max_clusters,
                });
            }
            if let Some(&label) = labels.iter().duplicates().next() {
                return Err(SeparationError::DuplicateLabel { label });
            }
        }
        log::debug!("Mode {} valid for {} vertices", self.name(), node_count);
        Ok(())
    }

    /// Cluster indices to scan, in scan order
    pub fn iteration_domain(&self, node_count: usize) -> Vec<u32> {
        match self {
            FormulationMode::Labeling { max_clusters } => (0..*max_clusters as u32).collect(),
            FormulationMode::RestrictedLabeling { clusters } => (0..*clusters as u32).collect(),
            FormulationMode::Centering => (0..node_count as u32).collect(),
            FormulationMode::Subset { labels, .. } => labels.clone(),
        }
    }

    /// Whether cluster `j` is in use in the candidate
    pub fn is_active<S: CandidateSolution + ?Sized>(&self, solution: &S, j: u32) -> bool {
        match self {
            FormulationMode::Labeling { .. } => solution.is_set(Variable::active(j)),
            FormulationMode::Centering => solution.is_set(Variable::assign(j, j)),
            FormulationMode::RestrictedLabeling { .. } | FormulationMode::Subset { .. } => true,
        }
    }

    /// Variable encoding "vertex belongs to cluster j"
    pub fn membership(&self, vertex: u32, j: u32) -> Variable {
        Variable::assign(vertex, j)
    }

    pub fn anchor_rule(&self, j: u32) -> AnchorRule {
        match self {
            FormulationMode::Centering => AnchorRule::Fixed(j),
            _ => AnchorRule::SmallestComponent,
        }
    }

    /// Cut forbidding the witnessed co-assignment unless the cluster is
    /// inactive or part of the separator joins it.
    pub fn build_cut(&self, violation: &Violation) -> Inequality {
        let j = violation.cluster;
        let separator = violation
            .separator
            .iter()
            .map(|&c| self.membership(c, j));
        let witnesses = vec![self.membership(violation.a, j), self.membership(violation.b, j)];

        match self {
            FormulationMode::Labeling { .. } => {
                let rhs = std::iter::once(Variable::active(j)).chain(separator).collect();
                Inequality::new(witnesses, 0, rhs)
            }
            FormulationMode::RestrictedLabeling { .. } | FormulationMode::Subset { .. } => {
                Inequality::new(witnesses, 1, separator.collect())
            }
            // The disconnected witness pairs a vertex with the center itself,
            // so x[b,b] appears on both sides and cancels.
            FormulationMode::Centering => match violation.kind {
                ViolationKind::Disconnected => {
                    Inequality::new(vec![self.membership(violation.a, j)], 0, separator.collect())
                }
                ViolationKind::TooFar => {
                    let rhs = std::iter::once(Variable::assign(j, j)).chain(separator).collect();
                    Inequality::new(witnesses, 0, rhs)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::separation::solution::SolutionSnapshot;

    fn violation(kind: ViolationKind) -> Violation {
        Violation { cluster: 2, a: 5, b: 2, separator: vec![7], kind }
    }

    #[test]
    fn labeling_cut_carries_activity() {
        let mode = FormulationMode::Labeling { max_clusters: 3 };
        let cut = mode.build_cut(&violation(ViolationKind::Disconnected));
        assert_eq!(cut.to_string(), "x[5,2] + x[2,2] <= y[2] + x[7,2]");
    }

    #[test]
    fn fixed_count_modes_use_constant_one() {
        for mode in [
            FormulationMode::RestrictedLabeling { clusters: 3 },
            FormulationMode::Subset { labels: vec![2], max_clusters: 3 },
        ] {
            let cut = mode.build_cut(&violation(ViolationKind::TooFar));
            assert_eq!(cut.to_string(), "x[5,2] + x[2,2] <= 1 + x[7,2]");
        }
    }

    #[test]
    fn centering_cuts_differ_by_branch() {
        let mode = FormulationMode::Centering;
        let cut = mode.build_cut(&violation(ViolationKind::Disconnected));
        assert_eq!(cut.to_string(), "x[5,2] <= x[7,2]");
        let cut = mode.build_cut(&violation(ViolationKind::TooFar));
        assert_eq!(cut.to_string(), "x[5,2] + x[2,2] <= x[2,2] + x[7,2]");
        assert_eq!(mode.anchor_rule(4), AnchorRule::Fixed(4));
    }

    #[test]
    fn domains_and_activity() {
        let mut snapshot = SolutionSnapshot::default();
        snapshot.set(Variable::active(1), 1.0);
        snapshot.set(Variable::assign(3, 3), 1.0);

        let labeling = FormulationMode::Labeling { max_clusters: 3 };
        assert_eq!(labeling.iteration_domain(10), vec![0, 1, 2]);
        assert!(labeling.is_active(&snapshot, 1));
        assert!(!labeling.is_active(&snapshot, 0));

        let centering = FormulationMode::Centering;
        assert_eq!(centering.iteration_domain(4), vec![0, 1, 2, 3]);
        assert!(centering.is_active(&snapshot, 3));
        assert!(!centering.is_active(&snapshot, 1));

        let subset = FormulationMode::Subset { labels: vec![4, 1], max_clusters: 5 };
        assert_eq!(subset.iteration_domain(10), vec![4, 1]);
        assert!(subset.is_active(&snapshot, 0));
    }

    #[test]
    fn subset_labels_are_range_checked() {
        let mode = FormulationMode::Subset { labels: vec![0, 6], max_clusters: 3 };
        assert_eq!(
            mode.validate(10),
            Err(SeparationError::LabelOutOfRange { label: 6, available: 3 })
        );

        let mode = FormulationMode::Subset { labels: vec![2, 0, 2], max_clusters: 3 };
        assert_eq!(mode.validate(10), Err(SeparationError::DuplicateLabel { label: 2 }));
    }
}
