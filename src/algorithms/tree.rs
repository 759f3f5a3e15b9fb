//! Binary search tree operations and traversals
//!
//! Every operation starts from a tree built by inserting the input values in
//! order. The node under consideration is highlighted for exactly one step,
//! so each capture shows where the walk currently is.

use super::AlgorithmError;
use crate::snapshot::tree::{Bst, Side, TreeNode};
use crate::trace::{Recorder, StepExtras};
use std::cmp::Ordering;
use std::collections::VecDeque;

pub const BST_INSERT: &[&str] = &[
    "if root is empty: root = new(value)",
    "if value < node: go left",
    "    if left is empty: node.left = new(value)",
    "if value > node: go right",
    "    if right is empty: node.right = new(value)",
    "else: value already present",
    "done",
];

pub const BST_SEARCH: &[&str] = &[
    "if root is empty: not found",
    "if node is empty: not found",
    "if value == node: found",
    "if value < node: search(node.left)",
    "else: search(node.right)",
    "done",
];

pub const BST_DELETE: &[&str] = &[
    "if root is empty: nothing to delete",
    "if node is empty: not found",
    "if value < node: node.left = delete(node.left, value)",
    "if value > node: node.right = delete(node.right, value)",
    "found the node to delete:",
    "    no children: remove it",
    "    only a right child: replace with right subtree",
    "    only a left child: replace with left subtree",
    "    two children:",
    "        successor = min(node.right)",
    "        node.value = successor; node.right = delete(node.right, successor)",
    "done",
];

pub const INORDER: &[&str] = &[
    "inorder(root)",
    "inorder(node): inorder(node.left)",
    "    visit(node)",
    "    inorder(node.right)",
    "done",
];

pub const PREORDER: &[&str] = &[
    "preorder(root)",
    "preorder(node): visit(node)",
    "    preorder(node.left)",
    "    preorder(node.right)",
    "done",
];

pub const POSTORDER: &[&str] = &[
    "postorder(root)",
    "postorder(node): postorder(node.left)",
    "    postorder(node.right)",
    "    visit(node)",
    "done",
];

pub const LEVEL_ORDER: &[&str] = &[
    "queue = [root]",
    "while queue is not empty: node = queue.pop_front(); visit(node)",
    "    if node.left: queue.push_back(node.left)",
    "    if node.right: queue.push_back(node.right)",
    "done",
];

/// Record one step with the node at `path` highlighted
fn flash(
    tree: &mut Bst,
    path: &[Side],
    description: impl Into<String>,
    extras: StepExtras,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    tree.set_highlight(path, true);
    rec.record_with(&*tree, description, extras)?;
    tree.set_highlight(path, false);
    Ok(())
}

fn summary(tree: &Bst, line: u32) -> StepExtras {
    StepExtras::line(line)
        .with("inorder", tree.inorder())
        .with("size", tree.len())
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "left",
        Side::Right => "right",
    }
}

pub fn bst_insert(values: &[i64], value: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut tree = Bst::from_values(values);
    rec.record_with(
        &tree,
        format!("Inserting {} into a tree of {} nodes", value, tree.len()),
        StepExtras::line(1),
    )?;

    let mut path = Vec::new();
    while let Some(current) = tree.node_at(&path).map(|n| n.value) {
        let (side, symbol, line) = match value.cmp(&current) {
            Ordering::Less => (Side::Left, "<", 2),
            Ordering::Greater => (Side::Right, ">", 4),
            Ordering::Equal => {
                flash(
                    &mut tree,
                    &path,
                    format!("{} already exists in tree", value),
                    StepExtras::line(6),
                    rec,
                )?;
                break;
            }
        };
        flash(
            &mut tree,
            &path,
            format!("{} {} {}, going {}", value, symbol, current, side_name(side)),
            StepExtras::line(line),
            rec,
        )?;

        path.push(side);
        if let Some(slot) = tree.slot_at_mut(&path).filter(|s| s.is_none()) {
            *slot = Some(Box::new(TreeNode::leaf(value)));
            tree.note_inserted();
            flash(
                &mut tree,
                &path,
                format!(
                    "Inserted {} as {} child of {}",
                    value,
                    side_name(side),
                    current
                ),
                StepExtras::line(line + 1),
                rec,
            )?;
            break;
        }
    }

    if tree.is_empty() {
        tree.insert(value);
        flash(
            &mut tree,
            &[],
            format!("Inserted {} as root node", value),
            StepExtras::line(1),
            rec,
        )?;
    }

    rec.record_with(&tree, "Insert operation completed", summary(&tree, 7))?;
    Ok(())
}

pub fn bst_search(values: &[i64], value: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut tree = Bst::from_values(values);
    rec.record_with(
        &tree,
        format!("Searching for {}", value),
        StepExtras::line(1),
    )?;

    let mut path = Vec::new();
    let found = loop {
        let Some(current) = tree.node_at(&path).map(|n| n.value) else {
            let description = if path.is_empty() {
                format!("Tree is empty, {} not found", value)
            } else {
                format!("Reached null node, {} not found", value)
            };
            let line = if path.is_empty() { 1 } else { 2 };
            rec.record_with(&tree, description, StepExtras::line(line))?;
            break false;
        };

        let (side, description, line) = match value.cmp(&current) {
            Ordering::Equal => {
                // the hit stays highlighted through the final step
                tree.set_highlight(&path, true);
                rec.record_with(&tree, format!("Found {}!", value), StepExtras::line(3))?;
                break true;
            }
            Ordering::Less => (
                Side::Left,
                format!("{} < {}, searching left subtree", value, current),
                4,
            ),
            Ordering::Greater => (
                Side::Right,
                format!("{} > {}, searching right subtree", value, current),
                5,
            ),
        };
        flash(&mut tree, &path, description, StepExtras::line(line), rec)?;
        path.push(side);
    };

    let outcome = if found { "found" } else { "not found" };
    rec.record_with(
        &tree,
        format!("Search completed: {} {}", value, outcome),
        StepExtras::line(6)
            .with("found", found)
            .with("depth", path.len()),
    )?;
    Ok(())
}

pub fn bst_delete(values: &[i64], value: i64, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut tree = Bst::from_values(values);
    rec.record_with(
        &tree,
        format!("Deleting {} from a tree of {} nodes", value, tree.len()),
        StepExtras::line(1),
    )?;

    if tree.is_empty() {
        rec.record_with(
            &tree,
            format!("Tree is empty, cannot delete {}", value),
            StepExtras::line(1),
        )?;
    } else {
        delete_from(&mut tree, Vec::new(), value, rec)?;
    }

    tree.clear_highlights();
    rec.record_with(&tree, "Delete operation completed", summary(&tree, 12))?;
    Ok(())
}

/// Remove `target` from the subtree at `path`. A two-child node takes its
/// inorder successor's value, then the walk continues into the right subtree
/// to remove the successor.
fn delete_from(
    tree: &mut Bst,
    mut path: Vec<Side>,
    mut target: i64,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    loop {
        let Some(current) = tree.node_at(&path).map(|n| n.value) else {
            rec.record_with(
                &*tree,
                format!("{} not found for deletion", target),
                StepExtras::line(2),
            )?;
            return Ok(());
        };

        match target.cmp(&current) {
            Ordering::Less => {
                flash(
                    tree,
                    &path,
                    format!("{} < {}, deleting from left subtree", target, current),
                    StepExtras::line(3),
                    rec,
                )?;
                path.push(Side::Left);
                continue;
            }
            Ordering::Greater => {
                flash(
                    tree,
                    &path,
                    format!("{} > {}, deleting from right subtree", target, current),
                    StepExtras::line(4),
                    rec,
                )?;
                path.push(Side::Right);
                continue;
            }
            Ordering::Equal => {}
        }

        flash(
            tree,
            &path,
            format!("Found node {} to delete", target),
            StepExtras::line(5),
            rec,
        )?;

        let (has_left, has_right) = match tree.node_at(&path) {
            Some(node) => (node.left.is_some(), node.right.is_some()),
            None => return Ok(()),
        };
        let replacement = match (has_left, has_right) {
            (false, false) => Some((format!("{} is a leaf node, removing it", target), 6, None)),
            (false, true) => Some((
                format!("{} has only right child, replacing with right subtree", target),
                7,
                Some(Side::Right),
            )),
            (true, false) => Some((
                format!("{} has only left child, replacing with left subtree", target),
                8,
                Some(Side::Left),
            )),
            (true, true) => None,
        };

        if let Some((description, line, keep)) = replacement {
            flash(tree, &path, description, StepExtras::line(line), rec)?;
            if let Some(slot) = tree.slot_at_mut(&path) {
                *slot = slot.take().and_then(|node| {
                    let TreeNode { left, right, .. } = *node;
                    match keep {
                        Some(Side::Left) => left,
                        Some(Side::Right) => right,
                        None => None,
                    }
                });
            }
            tree.note_removed();
            return Ok(());
        }

        flash(
            tree,
            &path,
            format!("{} has two children, finding inorder successor", target),
            StepExtras::line(9),
            rec,
        )?;

        let mut successor_path = path.clone();
        successor_path.push(Side::Right);
        while tree
            .node_at(&successor_path)
            .is_some_and(|n| n.left.is_some())
        {
            successor_path.push(Side::Left);
        }
        let Some(successor) = tree.node_at(&successor_path).map(|n| n.value) else {
            return Ok(());
        };
        flash(
            tree,
            &successor_path,
            format!("Found successor {} for {}", successor, target),
            StepExtras::line(10),
            rec,
        )?;

        if let Some(node) = tree.node_at_mut(&path) {
            node.value = successor;
        }
        flash(
            tree,
            &path,
            format!("Replaced {} with {}", target, successor),
            StepExtras::line(11),
            rec,
        )?;

        target = successor;
        path.push(Side::Right);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Pre,
    In,
    Post,
}

impl Order {
    fn label(self) -> &'static str {
        match self {
            Order::Pre => "Pre-order",
            Order::In => "In-order",
            Order::Post => "Post-order",
        }
    }

    fn visit_line(self) -> u32 {
        match self {
            Order::Pre => 2,
            Order::In => 3,
            Order::Post => 4,
        }
    }

    fn left_line(self) -> u32 {
        if self == Order::Pre {
            3
        } else {
            2
        }
    }

    fn right_line(self) -> u32 {
        if self == Order::Post {
            3
        } else {
            4
        }
    }
}

fn depth_first(values: &[i64], order: Order, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut tree = Bst::from_values(values);
    let mut result = Vec::new();
    rec.record_with(
        &tree,
        format!("Starting {} traversal", order.label().to_lowercase()),
        StepExtras::line(1).with("result", result.clone()),
    )?;

    walk(&mut tree, order, &mut Vec::new(), &mut result, rec)?;

    rec.record_with(
        &tree,
        format!("{} traversal completed", order.label()),
        StepExtras::line(5).with("result", result),
    )?;
    Ok(())
}

fn walk(
    tree: &mut Bst,
    order: Order,
    path: &mut Vec<Side>,
    result: &mut Vec<i64>,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    let Some((value, has_left, has_right)) = tree
        .node_at(path)
        .map(|n| (n.value, n.left.is_some(), n.right.is_some()))
    else {
        return Ok(());
    };

    let visit = |tree: &mut Bst, path: &[Side], result: &mut Vec<i64>, rec: &mut Recorder| {
        result.push(value);
        flash(
            tree,
            path,
            format!("Visiting node {}", value),
            StepExtras::line(order.visit_line()).with("result", result.clone()),
            rec,
        )
    };

    if order == Order::Pre {
        visit(tree, path.as_slice(), result, rec)?;
    }
    if has_left {
        flash(
            tree,
            path,
            format!("Visiting left subtree of {}", value),
            StepExtras::line(order.left_line()).with("result", result.clone()),
            rec,
        )?;
        path.push(Side::Left);
        walk(tree, order, path, result, rec)?;
        path.pop();
    }
    if order == Order::In {
        visit(tree, path.as_slice(), result, rec)?;
    }
    if has_right {
        flash(
            tree,
            path,
            format!("Visiting right subtree of {}", value),
            StepExtras::line(order.right_line()).with("result", result.clone()),
            rec,
        )?;
        path.push(Side::Right);
        walk(tree, order, path, result, rec)?;
        path.pop();
    }
    if order == Order::Post {
        visit(tree, path.as_slice(), result, rec)?;
    }
    Ok(())
}

pub fn inorder_traversal(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    depth_first(values, Order::In, rec)
}

pub fn preorder_traversal(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    depth_first(values, Order::Pre, rec)
}

pub fn postorder_traversal(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    depth_first(values, Order::Post, rec)
}

pub fn level_order_traversal(values: &[i64], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    let mut tree = Bst::from_values(values);
    let mut result: Vec<i64> = Vec::new();
    let mut queue: VecDeque<Vec<Side>> = VecDeque::new();
    if !tree.is_empty() {
        queue.push_back(Vec::new());
    }

    let description = if tree.is_empty() {
        "Tree is empty"
    } else {
        "Starting level-order traversal"
    };
    rec.record_with(
        &tree,
        description,
        StepExtras::line(1).with("result", result.clone()),
    )?;

    while let Some(path) = queue.pop_front() {
        let Some(value) = tree.node_at(&path).map(|n| n.value) else {
            continue;
        };
        result.push(value);
        flash(
            &mut tree,
            &path,
            format!("Visiting node {}", value),
            StepExtras::line(2).with("result", result.clone()),
            rec,
        )?;

        for (side, line) in [(Side::Left, 3), (Side::Right, 4)] {
            let mut child = path.clone();
            child.push(side);
            let Some(child_value) = tree.node_at(&child).map(|n| n.value) else {
                continue;
            };
            queue.push_back(child);
            flash(
                &mut tree,
                &path,
                format!("Added {} child {} to queue", side_name(side), child_value),
                StepExtras::line(line).with("result", result.clone()),
                rec,
            )?;
        }
    }

    rec.record_with(
        &tree,
        "Level-order traversal completed",
        StepExtras::line(5).with("result", result),
    )?;
    Ok(())
}
