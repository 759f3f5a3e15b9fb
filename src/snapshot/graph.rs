//! Weighted graph with traversal bookkeeping
//!
//! The graph is an adjacency matrix of non-negative weights where `0` means
//! "no edge". Traversal state (visited nodes and edges, the node and edge
//! currently under consideration, tentative distances) lives next to the
//! matrix so one capture shows everything a renderer needs.
//!
//! Sets and maps are ordered (`BTreeSet`/`BTreeMap`) so two captures of the
//! same state compare equal and serialize identically.

use super::{Capture, Snapshot};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub type NodeId = usize;

/// Tentative shortest-path distance
///
/// Variant order matters: every `Finite` sorts before `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Finite(i64),
    Infinite,
}

impl Distance {
    pub fn finite(self) -> Option<i64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GraphState {
    pub matrix: Vec<Vec<i64>>,
    pub visited_nodes: BTreeSet<NodeId>,
    pub visited_edges: BTreeSet<(NodeId, NodeId)>,
    pub current_node: Option<NodeId>,
    pub current_edge: Option<(NodeId, NodeId)>,
    pub distances: BTreeMap<NodeId, Distance>,
}

impl GraphState {
    pub fn new(matrix: Vec<Vec<i64>>) -> Self {
        GraphState {
            matrix,
            ..GraphState::default()
        }
    }

    pub fn node_count(&self) -> usize {
        self.matrix.len()
    }

    /// Edge weight, or `None` when there is no edge
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<i64> {
        self.matrix
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .filter(|w| *w > 0)
    }

    /// Neighbors of `node` in ascending order
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        (0..self.node_count())
            .filter(|&n| self.weight(node, n).is_some())
            .collect()
    }

    /// Drop the "currently looking at" markers, keeping visited state
    pub fn clear_focus(&mut self) {
        self.current_node = None;
        self.current_edge = None;
    }
}

impl Capture for GraphState {
    fn capture(&self) -> Snapshot {
        Snapshot::Graph(self.clone())
    }
}
