//! Owned binary search tree
//!
//! Nodes are addressed by a path of [`Side`]s from the root. Algorithms walk
//! the tree by path rather than by holding `&mut` into a subtree, which lets
//! them capture the whole tree between moves.

use super::{Capture, Snapshot};
use serde::Serialize;

/// Which child to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
    pub highlighted: bool,
}

impl TreeNode {
    pub fn leaf(value: i64) -> Self {
        TreeNode {
            value,
            left: None,
            right: None,
            highlighted: false,
        }
    }

    pub fn child(&self, side: Side) -> Option<&TreeNode> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    pub fn child_slot_mut(&mut self, side: Side) -> &mut Option<Box<TreeNode>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn collect_inorder(&self, out: &mut Vec<i64>) {
        if let Some(left) = &self.left {
            left.collect_inorder(out);
        }
        out.push(self.value);
        if let Some(right) = &self.right {
            right.collect_inorder(out);
        }
    }

    fn height(&self) -> usize {
        let l = self.left.as_ref().map_or(0, |n| n.height());
        let r = self.right.as_ref().map_or(0, |n| n.height());
        1 + l.max(r)
    }

    fn clear_highlights(&mut self) {
        self.highlighted = false;
        if let Some(left) = &mut self.left {
            left.clear_highlights();
        }
        if let Some(right) = &mut self.right {
            right.clear_highlights();
        }
    }
}

/// Captured tree contents; `root` is `None` for an empty tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TreeSnapshot {
    pub root: Option<TreeNode>,
}

impl TreeSnapshot {
    pub fn inorder(&self) -> Vec<i64> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_inorder(&mut out);
        }
        out
    }

    /// Values of highlighted nodes, in order
    pub fn highlighted(&self) -> Vec<i64> {
        fn walk(node: &TreeNode, out: &mut Vec<i64>) {
            if let Some(l) = &node.left {
                walk(l, out);
            }
            if node.highlighted {
                out.push(node.value);
            }
            if let Some(r) = &node.right {
                walk(r, out);
            }
        }
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            walk(root, &mut out);
        }
        out
    }

    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.height())
    }
}

/// Binary search tree with unique keys
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bst {
    root: Option<Box<TreeNode>>,
    len: usize,
}

impl Bst {
    pub fn new() -> Self {
        Bst::default()
    }

    /// Build a tree by inserting `values` in order, skipping duplicates
    pub fn from_values(values: &[i64]) -> Self {
        let mut tree = Bst::new();
        for &v in values {
            tree.insert(v);
        }
        tree
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    /// Insert without recording; returns false for a duplicate
    pub fn insert(&mut self, value: i64) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            if value == node.value {
                return false;
            }
            slot = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(TreeNode::leaf(value)));
        self.len += 1;
        true
    }

    pub fn contains(&self, value: i64) -> bool {
        let mut node = self.root();
        while let Some(n) = node {
            if value == n.value {
                return true;
            }
            node = n.child(if value < n.value { Side::Left } else { Side::Right });
        }
        false
    }

    pub fn inorder(&self) -> Vec<i64> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_inorder(&mut out);
        }
        out
    }

    pub fn node_at(&self, path: &[Side]) -> Option<&TreeNode> {
        let mut node = self.root()?;
        for &side in path {
            node = node.child(side)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[Side]) -> Option<&mut TreeNode> {
        self.slot_at_mut(path)?.as_deref_mut()
    }

    /// The `Option` slot a path points at (the root slot for an empty path)
    pub fn slot_at_mut(&mut self, path: &[Side]) -> Option<&mut Option<Box<TreeNode>>> {
        let mut slot = &mut self.root;
        for &side in path {
            match slot {
                Some(node) => slot = node.child_slot_mut(side),
                None => return None,
            }
        }
        Some(slot)
    }

    pub fn set_highlight(&mut self, path: &[Side], on: bool) {
        if let Some(node) = self.node_at_mut(path) {
            node.highlighted = on;
        }
    }

    pub fn clear_highlights(&mut self) {
        if let Some(root) = &mut self.root {
            root.clear_highlights();
        }
    }

    /// Adjust the element count after a structural edit through
    /// [`Bst::slot_at_mut`]
    pub(crate) fn note_removed(&mut self) {
        self.len = self.len.saturating_sub(1);
    }

    pub(crate) fn note_inserted(&mut self) {
        self.len += 1;
    }
}

impl Capture for Bst {
    fn capture(&self) -> Snapshot {
        Snapshot::Tree(TreeSnapshot {
            root: self.root.as_deref().cloned(),
        })
    }
}

impl Capture for TreeNode {
    fn capture(&self) -> Snapshot {
        Snapshot::Tree(TreeSnapshot {
            root: Some(self.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicates() {
        let mut tree = Bst::from_values(&[50, 30, 70, 20, 40]);
        assert_eq!(tree.len(), 5);
        assert!(!tree.insert(30));
        assert_eq!(tree.inorder(), vec![20, 30, 40, 50, 70]);
        assert!(tree.contains(40));
        assert!(!tree.contains(45));
    }

    #[test]
    fn test_paths() {
        let mut tree = Bst::from_values(&[50, 30, 70, 40]);
        assert_eq!(tree.node_at(&[Side::Left, Side::Right]).map(|n| n.value), Some(40));
        assert!(tree.node_at(&[Side::Right, Side::Right]).is_none());
        assert!(tree.slot_at_mut(&[Side::Right, Side::Right]).is_some());
        assert!(tree.slot_at_mut(&[Side::Right, Side::Right, Side::Left]).is_none());

        tree.set_highlight(&[Side::Left], true);
        assert_eq!(tree.node_at(&[Side::Left]).map(|n| n.highlighted), Some(true));
        tree.clear_highlights();
        assert_eq!(tree.node_at(&[Side::Left]).map(|n| n.highlighted), Some(false));
    }

    #[test]
    fn test_snapshot_height_and_highlights() {
        let mut tree = Bst::from_values(&[2, 1, 3, 4]);
        tree.set_highlight(&[Side::Right], true);
        let Snapshot::Tree(snap) = tree.capture() else {
            panic!("expected a tree snapshot");
        };
        assert_eq!(snap.height(), 3);
        assert_eq!(snap.highlighted(), vec![3]);
        assert_eq!(snap.inorder(), vec![1, 2, 3, 4]);
    }
}
