//! Point-in-time copies of the structures an algorithm works on
//!
//! This module provides the value types recorded into every step:
//! - [`array`]: tagged elements for sorting and searching
//! - [`graph`]: adjacency matrix plus traversal state
//! - [`grid`]: walkable cells plus path search state
//! - [`tree`]: an owned binary search tree
//! - [`sequence`]: stacks, queues and linked lists
//!
//! # Ownership
//!
//! A [`Snapshot`] owns all of its data. Nothing inside it is reference
//! counted, so capturing a structure and then mutating the structure can
//! never reach back into a step that was already recorded. Rewinding
//! playback always shows exactly what was captured.

pub mod array;
pub mod graph;
pub mod grid;
pub mod sequence;
pub mod tree;

use serde::Serialize;

pub use array::{ArraySnapshot, Element, Tag};
pub use graph::{Distance, GraphState, NodeId};
pub use grid::{Cell, GridState};
pub use sequence::{SequenceKind, SequenceState};
pub use tree::{Bst, Side, TreeNode, TreeSnapshot};

/// Snapshot of execution state for one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Snapshot {
    Array(ArraySnapshot),
    Graph(GraphState),
    Grid(GridState),
    Tree(TreeSnapshot),
    Sequence(SequenceState),
}

impl Snapshot {
    /// Short name of the structure family, used in status lines
    pub fn kind_name(&self) -> &'static str {
        match self {
            Snapshot::Array(_) => "array",
            Snapshot::Graph(_) => "graph",
            Snapshot::Grid(_) => "grid",
            Snapshot::Tree(_) => "tree",
            Snapshot::Sequence(s) => s.kind.name(),
        }
    }

    pub fn as_array(&self) -> Option<&ArraySnapshot> {
        match self {
            Snapshot::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphState> {
        match self {
            Snapshot::Graph(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_grid(&self) -> Option<&GridState> {
        match self {
            Snapshot::Grid(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TreeSnapshot> {
        match self {
            Snapshot::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceState> {
        match self {
            Snapshot::Sequence(s) => Some(s),
            _ => None,
        }
    }
}

/// Structures that can be captured into an owned [`Snapshot`].
///
/// Implementations must deep-copy: the returned value may not borrow from or
/// share allocations with `self`.
pub trait Capture {
    fn capture(&self) -> Snapshot;
}

impl Capture for Snapshot {
    fn capture(&self) -> Snapshot {
        self.clone()
    }
}

impl<T: Capture + ?Sized> Capture for &T {
    fn capture(&self) -> Snapshot {
        (**self).capture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_is_detached_from_source() {
        let mut elements = array::elements_from(&[3, 1, 2]);
        let before = elements.capture();

        elements[0].value = 99;
        elements[1].tag = Tag::Swapping;

        let expected = Snapshot::Array(ArraySnapshot {
            elements: array::elements_from(&[3, 1, 2]),
        });
        assert_eq!(before, expected);
        assert_ne!(before, elements.capture());
    }

    #[test]
    fn test_kind_names() {
        let seq = SequenceState::new(SequenceKind::Queue, &[1]);
        assert_eq!(seq.capture().kind_name(), "queue");
        assert_eq!(Bst::new().capture().kind_name(), "tree");
    }
}
