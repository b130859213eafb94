//! Property checks of soundness, minimality and completeness on random
//! small graphs and random assignments, across formulations and both
//! directedness modes.

mod common;

use common::{distance_avoiding, induced_diameter};
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;
use sclub_separator::cluster::Cluster;
use sclub_separator::graph::{CompressedGraph, Directedness, GraphBuilder};
use sclub_separator::{
    FormulationMode, OracleConfig, SearchContext, SeparationOracle, SolutionSnapshot,
};
use std::collections::HashSet;

const LABELS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Formulation {
    Labeling,
    Centering,
}

#[derive(Debug, Clone)]
struct Fixture {
    node_count: usize,
    edges: Vec<(u32, u32)>,
    labels: Vec<u32>,
    bound: u32,
    formulation: Formulation,
    directedness: Directedness,
}

impl Fixture {
    fn graph(&self) -> CompressedGraph {
        GraphBuilder::from_edges(self.node_count, &self.edges).unwrap()
    }

    fn config(&self) -> OracleConfig {
        let mode = match self.formulation {
            Formulation::Labeling => FormulationMode::Labeling {
                max_clusters: LABELS as usize,
            },
            Formulation::Centering => FormulationMode::Centering,
        };
        OracleConfig {
            diameter_bound: self.bound,
            mode,
            directedness: self.directedness,
            ..OracleConfig::default()
        }
    }

    /// Clusters keyed the way the formulation indexes them: by label, or by
    /// their smallest member acting as center.
    fn clusters(&self) -> Vec<Cluster> {
        let groups = (0..LABELS).map(|label| {
            (0..self.node_count as u32)
                .filter(|&v| self.labels[v as usize] == label)
                .collect::<Vec<u32>>()
        });
        match self.formulation {
            Formulation::Labeling => Cluster::from_member_lists(groups.collect()),
            Formulation::Centering => groups
                .filter(|members| !members.is_empty())
                .map(|members| Cluster::new(members[0], members))
                .collect(),
        }
    }

    fn snapshot(&self, clusters: &[Cluster]) -> SolutionSnapshot {
        match self.formulation {
            Formulation::Labeling => SolutionSnapshot::from_labels(clusters),
            Formulation::Centering => SolutionSnapshot::from_centers(clusters),
        }
    }
}

fn fixture_strategy() -> impl Strategy<Value = Fixture> {
    let formulation = prop_oneof![Just(Formulation::Labeling), Just(Formulation::Centering)];
    let directedness = prop_oneof![Just(Directedness::Undirected), Just(Directedness::Symmetric)];
    (2usize..10, formulation, directedness).prop_flat_map(|(n, formulation, directedness)| {
        let pairs: Vec<(u32, u32)> = (0..n as u32)
            .flat_map(|u| (u + 1..n as u32).map(move |v| (u, v)))
            .collect();
        let pair_count = pairs.len();
        (
            prop::collection::vec(prop::bool::weighted(0.35), pair_count),
            prop::collection::vec(0..LABELS, n),
            1u32..4,
        )
            .prop_map(move |(keep, labels, bound)| Fixture {
                node_count: n,
                edges: pairs
                    .iter()
                    .zip(keep)
                    .filter(|(_, keep)| *keep)
                    .map(|(&pair, _)| pair)
                    .collect(),
                labels,
                bound,
                formulation,
                directedness,
            })
    })
}

fn members_of(clusters: &[Cluster], id: u32) -> &[u32] {
    clusters
        .iter()
        .find(|cluster| cluster.id == id)
        .map(|cluster| cluster.members.as_slice())
        .unwrap_or(&[])
}

fn check_sound_and_minimal(fixture: &Fixture) -> TestCaseResult {
    let graph = fixture.graph();
    let context = SearchContext::new(graph.clone(), &fixture.config()).unwrap();
    let clusters = fixture.clusters();
    let snapshot = fixture.snapshot(&clusters);

    let mut cuts = Vec::new();
    let report = SeparationOracle::new(&context).separate(&snapshot, &mut cuts).unwrap();
    prop_assert_eq!(cuts.len(), report.violations.len());

    for (violation, cut) in report.violations.iter().zip(&cuts) {
        prop_assert!(cut.is_violated_by(&snapshot));

        let members = members_of(&clusters, violation.cluster);
        prop_assert!(members.contains(&violation.a) && members.contains(&violation.b));
        prop_assert!(violation.separator.iter().all(|c| !members.contains(c)));

        let blocked: HashSet<u32> = violation.separator.iter().copied().collect();
        let blocked_distance = distance_avoiding(&graph, violation.a, violation.b, &blocked);
        prop_assert!(blocked_distance.map_or(true, |d| d > fixture.bound));

        for &vertex in &violation.separator {
            let mut relaxed = blocked.clone();
            relaxed.remove(&vertex);
            let distance = distance_avoiding(&graph, violation.a, violation.b, &relaxed);
            prop_assert!(distance.map_or(false, |d| d <= fixture.bound));
        }
    }
    Ok(())
}

fn check_complete(fixture: &Fixture) -> TestCaseResult {
    let graph = fixture.graph();
    let context = SearchContext::new(graph.clone(), &fixture.config()).unwrap();
    let clusters = fixture.clusters();
    let snapshot = fixture.snapshot(&clusters);

    let mut cuts = Vec::new();
    let report = SeparationOracle::new(&context).separate(&snapshot, &mut cuts).unwrap();

    let violated: HashSet<u32> = report.violations.iter().map(|v| v.cluster).collect();
    for cluster in &clusters {
        let feasible = cluster.members.len() <= 1
            || induced_diameter(&graph, &cluster.members).map_or(false, |d| d <= fixture.bound);
        prop_assert_eq!(violated.contains(&cluster.id), !feasible);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn separators_are_sound_and_minimal(fixture in fixture_strategy()) {
        check_sound_and_minimal(&fixture)?;
    }

    #[test]
    fn infeasible_clusters_always_get_a_cut(fixture in fixture_strategy()) {
        check_complete(&fixture)?;
    }

    #[test]
    fn parallel_and_sequential_scans_agree(fixture in fixture_strategy()) {
        let context = SearchContext::new(fixture.graph(), &fixture.config()).unwrap();
        let snapshot = fixture.snapshot(&fixture.clusters());

        let mut sequential = Vec::new();
        let expected = SeparationOracle::new(&context).separate(&snapshot, &mut sequential).unwrap();
        let mut parallel = Vec::new();
        let report = SeparationOracle::new(&context).parallel(true).separate(&snapshot, &mut parallel).unwrap();

        prop_assert_eq!(report, expected);
        prop_assert_eq!(parallel, sequential);
    }
}
