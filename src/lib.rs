//! Separation oracle for s-club clustering formulations
//!
//! Given an integer candidate from a branch-and-cut search, the oracle finds
//! clusters that are disconnected or exceed the diameter bound and returns
//! lazy constraints built from minimal length-bounded vertex separators.

pub mod config;
pub mod error;
pub mod data;
pub mod graph;
pub mod cluster;
pub mod separation;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use config::OracleConfig;
pub use error::SeparationError;
pub use separation::{
    CandidateSolution, CutSink, FormulationMode, Inequality, SearchContext, SeparationOracle,
    SeparationReport, SolutionSnapshot, Variable, Violation, ViolationKind,
};
