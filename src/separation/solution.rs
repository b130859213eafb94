//! The two engine-facing seams: reading a candidate and submitting cuts

use crate::cluster::Cluster;
use crate::separation::inequality::{Inequality, Variable};
use std::collections::HashMap;

/// Values above this count as "set" in an integer candidate
pub const SET_THRESHOLD: f64 = 0.5;

/// Read-only view of the engine's current integer candidate.
///
/// Only valid for the duration of one oracle invocation.
pub trait CandidateSolution {
    /// Value of `variable`; variables the engine does not know read as 0.
    fn value(&self, variable: Variable) -> f64;

    fn is_set(&self, variable: Variable) -> bool {
        self.value(variable) >= SET_THRESHOLD
    }
}

/// Receiver for lazy constraints. Submitted cuts are never retracted.
pub trait CutSink {
    fn submit(&mut self, cut: Inequality);
}

impl CutSink for Vec<Inequality> {
    fn submit(&mut self, cut: Inequality) {
        self.push(cut);
    }
}

/// In-memory candidate: a sparse map of non-zero variable values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionSnapshot {
    values: HashMap<Variable, f64>,
}

impl SolutionSnapshot {
    pub fn set(&mut self, variable: Variable, value: f64) {
        if value == 0.0 {
            self.values.remove(&variable);
        } else {
            self.values.insert(variable, value);
        }
    }

    /// Labeling-style candidate: `x[v, id]` for every member, `y[id]` for every
    /// non-empty cluster.
    pub fn from_labels(clusters: &[Cluster]) -> Self {
        let mut snapshot = Self::default();
        for cluster in clusters {
            if cluster.members.is_empty() {
                continue;
            }
            snapshot.set(Variable::active(cluster.id), 1.0);
            for &member in &cluster.members {
                snapshot.set(Variable::assign(member, cluster.id), 1.0);
            }
        }
        snapshot
    }

    /// Centering-style candidate: each cluster's id is its center vertex,
    /// which is assigned to itself.
    pub fn from_centers(clusters: &[Cluster]) -> Self {
        let mut snapshot = Self::default();
        for cluster in clusters {
            snapshot.set(Variable::assign(cluster.id, cluster.id), 1.0);
            for &member in &cluster.members {
                snapshot.set(Variable::assign(member, cluster.id), 1.0);
            }
        }
        snapshot
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CandidateSolution for SolutionSnapshot {
    fn value(&self, variable: Variable) -> f64 {
        self.values.get(&variable).copied().unwrap_or(0.0)
    }
}

impl<F> CandidateSolution for F
where
    F: Fn(Variable) -> f64,
{
    fn value(&self, variable: Variable) -> f64 {
        self(variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_set_assignment_and_activity() {
        let clusters = Cluster::from_member_lists(vec![vec![0, 2], vec![]]);
        let snapshot = SolutionSnapshot::from_labels(&clusters);
        assert!(snapshot.is_set(Variable::assign(2, 0)));
        assert!(snapshot.is_set(Variable::active(0)));
        assert!(!snapshot.is_set(Variable::active(1)));
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn centers_assign_themselves() {
        let clusters = vec![Cluster::new(3, vec![1, 2])];
        let snapshot = SolutionSnapshot::from_centers(&clusters);
        assert!(snapshot.is_set(Variable::assign(3, 3)));
        assert!(snapshot.is_set(Variable::assign(1, 3)));
        assert!(!snapshot.is_set(Variable::assign(1, 1)));
    }

    #[test]
    fn threshold_applies_to_fractional_values() {
        let mut snapshot = SolutionSnapshot::default();
        snapshot.set(Variable::assign(0, 0), 0.4999);
        snapshot.set(Variable::assign(1, 0), 0.5);
        assert!(!snapshot.is_set(Variable::assign(0, 0)));
        assert!(snapshot.is_set(Variable::assign(1, 0)));

        snapshot.set(Variable::assign(1, 0), 0.0);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn closures_are_candidates() {
        let all_ones = |_: Variable| 1.0;
        assert!(all_ones.is_set(Variable::active(7)));
    }
}
