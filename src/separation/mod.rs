//! Lazy-constraint separation for s-club formulations
//!
//! [`SeparationOracle::separate`] is meant to be called from the engine's
//! integer-solution callback. It reads the candidate through
//! [`CandidateSolution`], scans every cluster index of the active
//! [`FormulationMode`], and hands one [`Inequality`] per violation witness to
//! a [`CutSink`]. All scratch state is local to the call; the
//! [`SearchContext`] is read-only and can be shared between workers.

pub mod boundary;
pub mod inequality;
pub mod minimality;
pub mod mode;
pub mod scanner;
pub mod solution;

pub use inequality::{Inequality, Variable};
pub use mode::{AnchorRule, FormulationMode};
pub use scanner::ClusterScanner;
pub use solution::{CandidateSolution, CutSink, SolutionSnapshot};

use crate::config::OracleConfig;
use crate::error::SeparationError;
use crate::graph::{CompressedGraph, Directedness};
use petgraph::graph::DiGraph;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Which branch of the scan produced a witness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The cluster's induced subgraph is disconnected
    Disconnected,
    /// The cluster is connected but `a` and `b` are too far apart inside it
    TooFar,
}

/// A witness `(a, b, separator)` found in one cluster.
///
/// Blocking `separator` leaves every `a`–`b` path longer than the bound, and
/// no proper subset does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    pub cluster: u32,
    pub a: u32,
    pub b: u32,
    pub separator: Vec<u32>,
    pub kind: ViolationKind,
}

/// Topology and formulation parameters for the lifetime of one search.
pub struct SearchContext {
    pub graph: CompressedGraph,
    /// Symmetric arc view of `graph`, node `i` is vertex `i`
    pub arcs: DiGraph<(), ()>,
    pub bound: u32,
    pub mode: FormulationMode,
    pub directedness: Directedness,
}

impl SearchContext {
    pub fn new(graph: CompressedGraph, config: &OracleConfig) -> Result<Self, SeparationError> {
        config.validate(graph.node_count)?;
        let arcs = graph.to_arc_graph();

        log::info!(
            "Search context: {} nodes, {} edges, s = {}, mode = {}",
            graph.node_count,
            graph.edge_count(),
            config.diameter_bound,
            config.mode.name()
        );

        Ok(Self {
            graph,
            arcs,
            bound: config.diameter_bound,
            mode: config.mode.clone(),
            directedness: config.directedness,
        })
    }
}

/// Counters from one oracle invocation, plus the witnesses behind its cuts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparationReport {
    pub clusters_scanned: usize,
    pub clusters_violated: usize,
    pub cuts_emitted: usize,
    /// The stop flag was raised before every cluster was scanned
    pub interrupted: bool,
    pub violations: Vec<Violation>,
}

enum ScanOutcome {
    Inactive,
    Stopped,
    Scanned(Vec<Violation>),
}

/// The separation routine invoked once per integer candidate.
pub struct SeparationOracle<'c> {
    context: &'c SearchContext,
    parallel: bool,
    stop: Option<Arc<AtomicBool>>,
}

impl<'c> SeparationOracle<'c> {
    pub fn new(context: &'c SearchContext) -> Self {
        Self {
            context,
            parallel: false,
            stop: None,
        }
    }

    /// Scan clusters on the rayon pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Flag checked between clusters; a running cluster scan always finishes
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Scan `solution` and submit one cut per violation witness to `sink`.
    ///
    /// Cuts are submitted in iteration-domain order whichever way the scan ran.
    pub fn separate<S, K>(
        &self,
        solution: &S,
        sink: &mut K,
    ) -> Result<SeparationReport, SeparationError>
    where
        S: CandidateSolution + Sync + ?Sized,
        K: CutSink + ?Sized,
    {
        let domain = self
            .context
            .mode
            .iteration_domain(self.context.graph.node_count);
        let scanner = ClusterScanner::new(self.context);

        let outcomes: Vec<(u32, ScanOutcome)> = if self.parallel {
            domain
                .par_iter()
                .map(|&j| self.scan_index(&scanner, solution, j).map(|outcome| (j, outcome)))
                .collect::<Result<_, _>>()?
        } else {
            let mut outcomes = Vec::with_capacity(domain.len());
            for &j in &domain {
                let outcome = self.scan_index(&scanner, solution, j)?;
                let stopped = matches!(outcome, ScanOutcome::Stopped);
                outcomes.push((j, outcome));
                if stopped {
                    break;
                }
            }
            outcomes
        };

        let mut report = SeparationReport::default();
        for (j, outcome) in outcomes {
            match outcome {
                ScanOutcome::Inactive => {}
                ScanOutcome::Stopped => report.interrupted = true,
                ScanOutcome::Scanned(violations) => {
                    report.clusters_scanned += 1;
                    if violations.is_empty() {
                        continue;
                    }
                    report.clusters_violated += 1;
                    log::debug!("Cluster {}: {} violation witnesses", j, violations.len());
                    for violation in violations {
                        sink.submit(self.context.mode.build_cut(&violation));
                        report.cuts_emitted += 1;
                        report.violations.push(violation);
                    }
                }
            }
        }

        log::debug!(
            "Separation scanned {} clusters, {} violated, {} cuts{}",
            report.clusters_scanned,
            report.clusters_violated,
            report.cuts_emitted,
            if report.interrupted { " (interrupted)" } else { "" }
        );

        Ok(report)
    }

    fn scan_index<S>(
        &self,
        scanner: &ClusterScanner<'_>,
        solution: &S,
        j: u32,
    ) -> Result<ScanOutcome, SeparationError>
    where
        S: CandidateSolution + ?Sized,
    {
        if self
            .stop
            .as_ref()
            .map_or(false, |stop| stop.load(Ordering::Relaxed))
        {
            return Ok(ScanOutcome::Stopped);
        }

        let mode = &self.context.mode;
        if !mode.is_active(solution, j) {
            return Ok(ScanOutcome::Inactive);
        }

        let members: Vec<u32> = (0..self.context.graph.node_count as u32)
            .filter(|&v| solution.is_set(mode.membership(v, j)))
            .collect();

        let violations = scanner.scan(j, &members, mode.anchor_rule(j))?;
        Ok(ScanOutcome::Scanned(violations))
    }
}
