//! Linear containers: stacks, queues and singly linked lists

use super::array::{elements_from, Element, Tag};
use super::{Capture, Snapshot};
use serde::Serialize;

/// Fixed slot count shared by all linear containers
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    Stack,
    Queue,
    LinkedList,
}

impl SequenceKind {
    pub fn name(self) -> &'static str {
        match self {
            SequenceKind::Stack => "stack",
            SequenceKind::Queue => "queue",
            SequenceKind::LinkedList => "linked list",
        }
    }
}

/// Elements in logical order: bottom-to-top for a stack, front-to-rear for a
/// queue, head-to-tail for a linked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceState {
    pub kind: SequenceKind,
    pub elements: Vec<Element>,
    pub capacity: usize,
}

impl SequenceState {
    pub fn new(kind: SequenceKind, values: &[i64]) -> Self {
        SequenceState {
            kind,
            elements: elements_from(values),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.elements.len() >= self.capacity
    }

    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    pub fn reset_tags(&mut self) {
        for e in &mut self.elements {
            e.tag = Tag::Normal;
        }
    }
}

impl Capture for SequenceState {
    fn capture(&self) -> Snapshot {
        Snapshot::Sequence(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity() {
        let values: Vec<i64> = (0..DEFAULT_CAPACITY as i64).collect();
        let full = SequenceState::new(SequenceKind::Stack, &values);
        assert!(full.is_full());
        assert!(!SequenceState::new(SequenceKind::Stack, &[]).is_full());
    }

    #[test]
    fn test_reset_tags() {
        let mut s = SequenceState::new(SequenceKind::LinkedList, &[1, 2]);
        s.elements[1].tag = Tag::Comparing;
        s.reset_tags();
        assert!(s.elements.iter().all(|e| e.tag == Tag::Normal));
        assert_eq!(s.values(), vec![1, 2]);
    }
}
