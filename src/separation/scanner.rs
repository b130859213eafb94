//! Per-cluster violation scanning

use crate::cluster::{Connectivity, ConnectivityAnalyzer};
use crate::error::SeparationError;
use crate::graph::algorithms::{far_pairs, membership_mask};
use crate::separation::boundary::boundary_separator;
use crate::separation::minimality::{DistanceCache, LengthBoundedReducer};
use crate::separation::mode::AnchorRule;
use crate::separation::{SearchContext, Violation, ViolationKind};

/// Finds every violation witness in one cluster of a candidate.
pub struct ClusterScanner<'c> {
    context: &'c SearchContext,
    analyzer: ConnectivityAnalyzer<'c>,
    reducer: LengthBoundedReducer<'c>,
}

impl<'c> ClusterScanner<'c> {
    pub fn new(context: &'c SearchContext) -> Self {
        Self {
            context,
            analyzer: ConnectivityAnalyzer::new(&context.graph, context.directedness),
            reducer: LengthBoundedReducer::new(
                &context.graph,
                &context.arcs,
                context.bound,
                context.directedness,
            ),
        }
    }

    /// Witnesses for cluster `cluster` with the given members.
    ///
    /// Empty and singleton clusters never yield witnesses.
    pub fn scan(
        &self,
        cluster: u32,
        members: &[u32],
        anchor_rule: AnchorRule,
    ) -> Result<Vec<Violation>, SeparationError> {
        if members.len() <= 1 {
            return Ok(Vec::new());
        }

        match self.analyzer.analyze(members) {
            Connectivity::Disconnected { components } => {
                self.scan_disconnected(cluster, &components, anchor_rule)
            }
            Connectivity::Connected { diameter } if diameter > self.context.bound => {
                log::debug!(
                    "Cluster {} is connected with diameter {} > {}",
                    cluster,
                    diameter,
                    self.context.bound
                );
                Ok(self.scan_too_far(cluster, members))
            }
            Connectivity::Connected { .. } => Ok(Vec::new()),
        }
    }

    fn scan_disconnected(
        &self,
        cluster: u32,
        components: &[Vec<u32>],
        anchor_rule: AnchorRule,
    ) -> Result<Vec<Violation>, SeparationError> {
        let anchor = match anchor_rule {
            AnchorRule::Fixed(vertex) => vertex,
            AnchorRule::SmallestComponent => components
                .iter()
                .min_by_key(|component| component.len())
                .and_then(|component| component.first().copied())
                .ok_or(SeparationError::EmptyComponent)?,
        };

        let mut violations = Vec::with_capacity(components.len() - 1);
        for component in components {
            if component.contains(&anchor) {
                continue;
            }
            let a = *component.first().ok_or(SeparationError::EmptyComponent)?;
            let candidate = boundary_separator(&self.context.graph, component, anchor)?;
            let separator = self.reducer.minimize(&candidate, a, anchor);

            log::debug!(
                "Cluster {}: component of {} cut off from {} by {} of {} boundary vertices",
                cluster,
                component.len(),
                anchor,
                separator.len(),
                candidate.len()
            );

            violations.push(Violation {
                cluster,
                a,
                b: anchor,
                separator,
                kind: ViolationKind::Disconnected,
            });
        }

        Ok(violations)
    }

    fn scan_too_far(&self, cluster: u32, members: &[u32]) -> Vec<Violation> {
        let graph = &self.context.graph;
        let in_cluster = membership_mask(graph.node_count, members);
        let mut distances = DistanceCache::new(graph);

        far_pairs(graph, members, &in_cluster, self.context.bound)
            .into_iter()
            .map(|(a, b)| {
                let separator = self.reducer.too_far_separator(&in_cluster, a, b, &mut distances);
                Violation {
                    cluster,
                    a,
                    b,
                    separator,
                    kind: ViolationKind::TooFar,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OracleConfig;
    use crate::graph::GraphBuilder;

    fn context(edges: &[(u32, u32)], n: usize, bound: u32) -> SearchContext {
        let graph = GraphBuilder::from_edges(n, edges).unwrap();
        let config = OracleConfig {
            diameter_bound: bound,
            ..OracleConfig::default()
        };
        SearchContext::new(graph, &config).unwrap()
    }

    #[test]
    fn smallest_component_anchors_the_scan() {
        let ctx = context(&[(0, 1), (1, 2), (2, 3), (3, 4)], 5, 4);
        let scanner = ClusterScanner::new(&ctx);
        let violations = scanner
            .scan(0, &[0, 1, 4], AnchorRule::SmallestComponent)
            .unwrap();
        assert_eq!(
            violations,
            vec![Violation {
                cluster: 0,
                a: 0,
                b: 4,
                separator: vec![2],
                kind: ViolationKind::Disconnected,
            }]
        );
    }

    #[test]
    fn fixed_anchor_targets_every_other_component() {
        let ctx = context(&[(0, 1), (2, 3), (4, 5)], 6, 2);
        let scanner = ClusterScanner::new(&ctx);
        let violations = scanner
            .scan(3, &[0, 2, 3, 4], AnchorRule::Fixed(3))
            .unwrap();
        let witnesses: Vec<(u32, u32)> = violations.iter().map(|v| (v.a, v.b)).collect();
        assert_eq!(witnesses, vec![(0, 3), (4, 3)]);
        assert!(violations.iter().all(|v| v.separator.is_empty()));
    }

    #[test]
    fn short_clusters_are_clean() {
        let ctx = context(&[(0, 1), (1, 2), (2, 3), (3, 4)], 5, 2);
        let scanner = ClusterScanner::new(&ctx);
        assert!(scanner.scan(0, &[1, 2, 3], AnchorRule::SmallestComponent).unwrap().is_empty());
        assert!(scanner.scan(0, &[4], AnchorRule::SmallestComponent).unwrap().is_empty());
    }
}
