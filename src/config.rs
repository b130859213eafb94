//! Configuration management for the separation oracle

use crate::error::SeparationError;
use crate::graph::Directedness;
use crate::separation::FormulationMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Formulation parameters and execution options for one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Diameter bound `s` every cluster must respect
    pub diameter_bound: u32,

    /// Formulation the cuts are phrased for
    pub mode: FormulationMode,

    /// Connectivity and blocking interpretation
    pub directedness: Directedness,

    /// Scan clusters of one candidate on the rayon pool
    pub parallel_scan: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            diameter_bound: 2,
            mode: FormulationMode::default(),
            directedness: Directedness::Undirected,
            parallel_scan: false,
        }
    }
}

impl OracleConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Check the parameters against a graph of `node_count` vertices
    pub fn validate(&self, node_count: usize) -> Result<(), SeparationError> {
        if self.diameter_bound == 0 {
            return Err(SeparationError::InvalidBound);
        }
        self.mode.validate(node_count)
    }
}
