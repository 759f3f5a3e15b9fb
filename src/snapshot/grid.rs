//! Rectangular walkable grid with search bookkeeping
//!
//! Cells are addressed `(row, col)` from the top-left corner. Movement is
//! orthogonal with unit cost. The open and closed sets, the cell being
//! expanded and the final path travel with the grid so a renderer needs
//! nothing else.

use super::{Capture, Snapshot};
use serde::Serialize;
use std::collections::BTreeSet;

pub type Cell = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GridState {
    pub rows: usize,
    pub cols: usize,
    pub walls: BTreeSet<Cell>,
    pub start: Cell,
    pub goal: Cell,
    /// Discovered but not yet expanded
    pub open: BTreeSet<Cell>,
    /// Already expanded
    pub closed: BTreeSet<Cell>,
    pub current: Option<Cell>,
    /// Neighbor whose score is being updated
    pub neighbor: Option<Cell>,
    /// Start to goal, filled once the goal is reached
    pub path: Vec<Cell>,
}

impl GridState {
    pub fn new(rows: usize, cols: usize, start: Cell, goal: Cell) -> Self {
        GridState {
            rows,
            cols,
            start,
            goal,
            ..GridState::default()
        }
    }

    pub fn contains(&self, (row, col): Cell) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// Walkable cells next to `cell`: up, right, down, left
    pub fn neighbors(&self, (row, col): Cell) -> Vec<Cell> {
        let candidates = [
            row.checked_sub(1).map(|r| (r, col)),
            Some((row, col + 1)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|&c| self.contains(c) && !self.is_wall(c))
            .collect()
    }

    pub fn clear_focus(&mut self) {
        self.current = None;
        self.neighbor = None;
    }
}

/// Manhattan distance between two cells
pub fn manhattan(a: Cell, b: Cell) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

impl Capture for GridState {
    fn capture(&self) -> Snapshot {
        Snapshot::Grid(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_skip_edges_and_walls() {
        let mut g = GridState::new(2, 3, (0, 0), (1, 2));
        g.walls.insert((0, 1));
        assert_eq!(g.neighbors((0, 0)), vec![(1, 0)]);
        assert_eq!(g.neighbors((1, 1)), vec![(1, 2), (1, 0)]);
        assert_eq!(g.neighbors((0, 2)), vec![(1, 2)]);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((0, 0), (3, 4)), 7);
        assert_eq!(manhattan((5, 1), (2, 1)), 3);
    }
}
