//! Decision variables and the cutting-plane inequalities built over them

use crate::separation::solution::CandidateSolution;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decision variable of an s-club formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variable {
    /// `x[vertex, cluster]`: vertex is assigned to cluster
    Assign { vertex: u32, cluster: u32 },
    /// `y[cluster]`: cluster is in use
    Active { cluster: u32 },
}

impl Variable {
    pub const fn assign(vertex: u32, cluster: u32) -> Self {
        Variable::Assign { vertex, cluster }
    }

    pub const fn active(cluster: u32) -> Self {
        Variable::Active { cluster }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Assign { vertex, cluster } => write!(f, "x[{},{}]", vertex, cluster),
            Variable::Active { cluster } => write!(f, "y[{}]", cluster),
        }
    }
}

/// `sum(lhs) <= rhs_constant + sum(rhs)`, all coefficients 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inequality {
    pub lhs: Vec<Variable>,
    pub rhs_constant: u32,
    pub rhs: Vec<Variable>,
}

impl Inequality {
    pub fn new(lhs: Vec<Variable>, rhs_constant: u32, rhs: Vec<Variable>) -> Self {
        Self { lhs, rhs_constant, rhs }
    }

    /// Evaluate `lhs - rhs` at a candidate; positive means violated.
    pub fn slack_violation<S: CandidateSolution + ?Sized>(&self, solution: &S) -> f64 {
        let lhs: f64 = self.lhs.iter().map(|&var| solution.value(var)).sum();
        let rhs: f64 = self.rhs.iter().map(|&var| solution.value(var)).sum();
        lhs - (f64::from(self.rhs_constant) + rhs)
    }

    /// Whether the candidate breaks this inequality
    pub fn is_violated_by<S: CandidateSolution + ?Sized>(&self, solution: &S) -> bool {
        self.slack_violation(solution) > 1e-6
    }
}

impl fmt::Display for Inequality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lhs: Vec<String> = self.lhs.iter().map(ToString::to_string).collect();
        write!(f, "{} <=", lhs.join(" + "))?;

        let mut rhs: Vec<String> = Vec::with_capacity(self.rhs.len() + 1);
        if self.rhs_constant > 0 || self.rhs.is_empty() {
            rhs.push(self.rhs_constant.to_string());
        }
        rhs.extend(self.rhs.iter().map(ToString::to_string));
        write!(f, " {}", rhs.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::separation::solution::SolutionSnapshot;

    #[test]
    fn display_reads_like_the_model() {
        let cut = Inequality::new(
            vec![Variable::assign(0, 1), Variable::assign(4, 1)],
            0,
            vec![Variable::active(1), Variable::assign(2, 1)],
        );
        assert_eq!(cut.to_string(), "x[0,1] + x[4,1] <= y[1] + x[2,1]");

        let cut = Inequality::new(vec![Variable::assign(3, 0)], 0, vec![]);
        assert_eq!(cut.to_string(), "x[3,0] <= 0");
    }

    #[test]
    fn violation_against_snapshot() {
        let mut snapshot = SolutionSnapshot::default();
        snapshot.set(Variable::assign(0, 0), 1.0);
        snapshot.set(Variable::assign(1, 0), 1.0);

        let cut = Inequality::new(
            vec![Variable::assign(0, 0), Variable::assign(1, 0)],
            1,
            vec![Variable::assign(2, 0)],
        );
        assert!(cut.is_violated_by(&snapshot));

        snapshot.set(Variable::assign(2, 0), 1.0);
        assert!(!cut.is_violated_by(&snapshot));
    }
}
