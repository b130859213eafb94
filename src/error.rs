//! Error types for the separation oracle

use thiserror::Error;

/// Precondition failures raised by graph construction and separation.
///
/// None of these are recoverable mid-search: they indicate the oracle was
/// handed inputs that no valid formulation produces.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SeparationError {
    /// A vertex index outside `0..node_count`.
    #[error("vertex {vertex} is out of range for a graph with {node_count} nodes")]
    VertexOutOfRange { vertex: u32, node_count: usize },

    /// The boundary separator was asked to cut off an empty component.
    #[error("target component is empty")]
    EmptyComponent,

    /// The anchor is part of the component it should be separated from.
    #[error("anchor vertex {anchor} lies inside the target component")]
    AnchorInComponent { anchor: u32 },

    /// Diameter bounds start at 1.
    #[error("diameter bound must be at least 1")]
    InvalidBound,

    /// A subset scan named a label the formulation does not have.
    #[error("cluster label {label} is out of range for {available} labels")]
    LabelOutOfRange { label: u32, available: usize },

    /// A subset scan named the same label twice.
    #[error("cluster label {label} is listed more than once")]
    DuplicateLabel { label: u32 },
}
