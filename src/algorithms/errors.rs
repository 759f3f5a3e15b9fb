//! Errors for invalid algorithm input

use crate::snapshot::NodeId;
use crate::trace::TraceError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("{0} requires a target value")]
    MissingTarget(&'static str),

    #[error("{0} requires input sorted in ascending order")]
    UnsortedInput(&'static str),

    #[error("value range {range} is too large for counting sort (limit {limit})")]
    RangeTooLarge { range: u128, limit: u64 },

    #[error("adjacency matrix must be square: row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix { row: usize, len: usize, expected: usize },

    #[error("edge {from}-{to} has negative weight {weight}")]
    NegativeWeight { from: NodeId, to: NodeId, weight: i64 },

    #[error("total weight overflowed adding edge {from}-{to} of weight {weight}")]
    WeightOverflow { from: NodeId, to: NodeId, weight: i64 },

    #[error("node {node} is out of range for a graph with {count} nodes")]
    NodeOutOfRange { node: NodeId, count: usize },

    #[error("grid row {row} has {len} cells, expected {expected}")]
    RaggedGrid { row: usize, len: usize, expected: usize },

    #[error("unexpected `{ch}` at grid row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },

    #[error("grid needs exactly one `{marker}`, found {found}")]
    GridMarker { marker: char, found: usize },

    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    CellOutOfRange { row: usize, col: usize, rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is a wall")]
    BlockedCell { row: usize, col: usize },

    #[error("{kind} overflow: capacity is {capacity}")]
    Overflow { kind: &'static str, capacity: usize },

    #[error("{0} underflow: nothing to remove")]
    Underflow(&'static str),

    #[error("position {position} is out of range for a list of length {len}")]
    PositionOutOfRange { position: usize, len: usize },
}
