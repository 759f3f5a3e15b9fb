//! Tagged array elements for sorting and searching visualizations

use super::{Capture, Snapshot};
use serde::Serialize;

/// Visual role of an element at the moment it was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    #[default]
    Normal,
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Min,
}

/// A single array slot: its value and how it should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Element {
    pub value: i64,
    pub tag: Tag,
}

impl Element {
    pub fn new(value: i64) -> Self {
        Element {
            value,
            tag: Tag::Normal,
        }
    }

    pub fn tagged(value: i64, tag: Tag) -> Self {
        Element { value, tag }
    }
}

/// Build untagged elements from raw values
pub fn elements_from(values: &[i64]) -> Vec<Element> {
    values.iter().copied().map(Element::new).collect()
}

/// Captured array contents
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ArraySnapshot {
    pub elements: Vec<Element>,
}

impl ArraySnapshot {
    /// The plain values, in order
    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Whether every element carries `tag`
    pub fn all_tagged(&self, tag: Tag) -> bool {
        self.elements.iter().all(|e| e.tag == tag)
    }

    /// Indices of elements carrying `tag`
    pub fn positions_of(&self, tag: Tag) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.tag == tag)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Capture for [Element] {
    fn capture(&self) -> Snapshot {
        Snapshot::Array(ArraySnapshot {
            elements: self.to_vec(),
        })
    }
}

impl Capture for Vec<Element> {
    fn capture(&self) -> Snapshot {
        self.as_slice().capture()
    }
}
