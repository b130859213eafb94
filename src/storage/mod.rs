//! Results persistence module

use anyhow::Result;
use crate::cluster::SolutionCheck;
use crate::config::OracleConfig;
use crate::graph::CompressedGraph;
use crate::separation::{Inequality, SeparationReport};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty};

/// Everything one oracle run produced
pub struct RunResults<'a> {
    pub graph: &'a CompressedGraph,
    pub config: &'a OracleConfig,
    pub components: usize,
    pub check: &'a SolutionCheck,
    pub report: &'a SeparationReport,
    pub cuts: &'a [Inequality],
}

/// Save run results to the specified directory
pub fn save_results(results: &RunResults<'_>, output_dir: &str) -> Result<()> {
    log::info!("Saving {} cuts to {}", results.cuts.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(results, output_dir)?;
    save_cuts(results, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(results: &RunResults<'_>, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let graph = results.graph;
    let report = results.report;
    let avg_degree = if graph.node_count == 0 {
        0.0
    } else {
        graph.edges.len() as f64 / graph.node_count as f64
    };
    let max_degree = (0..graph.node_count).map(|v| graph.degree(v)).max().unwrap_or(0);
    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count,
            "edge_count": graph.edge_count(),
            "component_count": results.components,
            "avg_degree": avg_degree,
            "max_degree": max_degree,
        },
        "config": results.config,
        "candidate": {
            "feasible": results.check.is_valid(),
            "check": results.check,
        },
        "separation": {
            "clusters_scanned": report.clusters_scanned,
            "clusters_violated": report.clusters_violated,
            "cuts_emitted": report.cuts_emitted,
            "interrupted": report.interrupted,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save every witness next to the cut built from it
fn save_cuts(results: &RunResults<'_>, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("cuts.json");
    let mut file = File::create(path)?;

    let graph = results.graph;
    let cuts_json = json!({
        "cuts": results.report.violations.iter().zip(results.cuts).map(|(violation, cut)| {
            json!({
                "cluster": violation.cluster,
                "kind": violation.kind,
                "a": graph.label(violation.a),
                "b": graph.label(violation.b),
                "separator": violation.separator.iter().map(|&c| graph.label(c)).collect::<Vec<_>>(),
                "inequality": cut.to_string(),
                "terms": cut,
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&cuts_json)?.as_bytes())?;

    Ok(())
}
