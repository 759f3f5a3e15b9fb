//! A* search on a walkable grid
//!
//! Grids are written one row per line (or `;`-separated): `.` is open, `#`
//! is a wall, `S` and `G` mark the start and goal. Moves are orthogonal and
//! cost 1; the heuristic is Manhattan distance, which never overestimates on
//! such a grid, so the first time the goal is expanded its path is shortest.
//!
//! Among open cells with equal `f`, the one closer to the goal wins, then the
//! one earlier in row-major order.

use super::AlgorithmError;
use crate::snapshot::grid::{manhattan, Cell, GridState};
use crate::trace::{Recorder, StepExtras};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::collections::BTreeSet;

/// Five-by-nine maze used when no grid is supplied
pub const SAMPLE_GRID: &str = "S...#....;.##.#.##.;.#..#..#.;.#.###.#.;.......#G";

pub const ASTAR: &[&str] = &[
    "open = {start}; g[start] = 0",
    "while open is not empty:",
    "    current = cell in open with lowest f = g + h; close it",
    "    if current == goal: break",
    "    for nb in neighbors(current) not closed:",
    "        if g[current] + 1 < g[nb]: g[nb] = g[current] + 1; parent[nb] = current",
    "path = follow parent links back from goal",
    "no path: open set ran out",
];

pub fn sample_grid() -> Result<GridState, AlgorithmError> {
    parse_grid(SAMPLE_GRID)
}

pub fn parse_grid(text: &str) -> Result<GridState, AlgorithmError> {
    let rows: Vec<&str> = text
        .split([';', '\n'])
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .collect();
    let cols = rows.first().map_or(0, |row| row.chars().count());

    let mut starts = Vec::new();
    let mut goals = Vec::new();
    let mut walls = BTreeSet::new();
    for (row, line) in rows.iter().enumerate() {
        let len = line.chars().count();
        if len != cols {
            return Err(AlgorithmError::RaggedGrid {
                row,
                len,
                expected: cols,
            });
        }
        for (col, ch) in line.chars().enumerate() {
            match ch {
                '.' => {}
                '#' => {
                    walls.insert((row, col));
                }
                'S' => starts.push((row, col)),
                'G' => goals.push((row, col)),
                _ => return Err(AlgorithmError::UnknownCell { ch, row, col }),
            }
        }
    }

    let start = single(&starts, 'S')?;
    let goal = single(&goals, 'G')?;
    let mut grid = GridState::new(rows.len(), cols, start, goal);
    grid.walls = walls;
    Ok(grid)
}

fn single(found: &[Cell], marker: char) -> Result<Cell, AlgorithmError> {
    match found {
        [cell] => Ok(*cell),
        _ => Err(AlgorithmError::GridMarker {
            marker,
            found: found.len(),
        }),
    }
}

/// Start and goal must be inside the grid and walkable
pub fn validate_grid(grid: &GridState) -> Result<(), AlgorithmError> {
    for cell in [grid.start, grid.goal] {
        let (row, col) = cell;
        if !grid.contains(cell) {
            return Err(AlgorithmError::CellOutOfRange {
                row,
                col,
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        if grid.is_wall(cell) {
            return Err(AlgorithmError::BlockedCell { row, col });
        }
    }
    Ok(())
}

fn name((row, col): Cell) -> String {
    format!("({}, {})", row, col)
}

fn scores(line: u32, g: usize, h: usize) -> StepExtras {
    StepExtras::line(line)
        .with("g", g)
        .with("h", h)
        .with("f", g + h)
}

pub fn astar(grid: &GridState, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    validate_grid(grid)?;

    let mut g = GridState::new(grid.rows, grid.cols, grid.start, grid.goal);
    g.walls = grid.walls.clone();
    let (start, goal) = (g.start, g.goal);
    let h = |cell: Cell| manhattan(cell, goal);

    let mut g_score: FxHashMap<Cell, usize> = FxHashMap::default();
    let mut parent: FxHashMap<Cell, Cell> = FxHashMap::default();
    g_score.insert(start, 0);
    g.open.insert(start);
    rec.record_with(
        &g,
        format!("Starting A* from {} to {}", name(start), name(goal)),
        scores(1, 0, h(start)),
    )?;

    let mut reached = false;
    loop {
        let Some(current) = g
            .open
            .iter()
            .copied()
            .min_by_key(|&c| (g_score[&c] + h(c), h(c), c))
        else {
            break;
        };
        let cost = g_score[&current];
        g.open.remove(&current);
        g.closed.insert(current);
        g.current = Some(current);
        g.neighbor = None;
        rec.record_with(
            &g,
            format!(
                "Expanding {} with f = {} + {}",
                name(current),
                cost,
                h(current)
            ),
            scores(3, cost, h(current)).with("open", g.open.len()),
        )?;

        if current == goal {
            rec.record_with(
                &g,
                format!("Reached the goal at {}", name(goal)),
                scores(4, cost, 0),
            )?;
            reached = true;
            break;
        }

        for nb in g.neighbors(current) {
            if g.closed.contains(&nb) {
                continue;
            }
            let tentative = cost + 1;
            if g_score.get(&nb).is_some_and(|&old| tentative >= old) {
                continue;
            }
            g_score.insert(nb, tentative);
            parent.insert(nb, current);
            g.open.insert(nb);
            g.neighbor = Some(nb);
            rec.record_with(
                &g,
                format!(
                    "Updating {}: g = {}, f = {}",
                    name(nb),
                    tentative,
                    tentative + h(nb)
                ),
                scores(6, tentative, h(nb)),
            )?;
        }
    }

    g.clear_focus();
    if !reached {
        rec.record_with(
            &g,
            format!("No path from {} to {}", name(start), name(goal)),
            StepExtras::line(8)
                .with("path_length", Value::Null)
                .with("visited", g.closed.len()),
        )?;
        return Ok(());
    }

    let mut path = vec![goal];
    let mut cell = goal;
    while let Some(&p) = parent.get(&cell) {
        path.push(p);
        cell = p;
    }
    path.reverse();

    for &cell in &path {
        g.path.push(cell);
        rec.record_with(
            &g,
            format!("Tracing path through {}", name(cell)),
            StepExtras::line(7).with("g", g_score[&cell]),
        )?;
    }

    let moves = path.len() - 1;
    let cells: Vec<Vec<usize>> = path.iter().map(|&(r, c)| vec![r, c]).collect();
    rec.record_with(
        &g,
        format!("Shortest path found: {} moves", moves),
        StepExtras::line(7)
            .with("path_length", moves)
            .with("path", cells)
            .with("visited", g.closed.len()),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    fn run(grid: &GridState) -> Trace {
        let mut rec = Recorder::new("a*");
        astar(grid, &mut rec).unwrap();
        rec.finish().unwrap()
    }

    fn path_length(trace: &Trace) -> Value {
        trace.last().unwrap().meta("path_length").cloned().unwrap()
    }

    #[test]
    fn test_parse_grid() {
        let g = parse_grid("S.#\n..G").unwrap();
        assert_eq!((g.rows, g.cols), (2, 3));
        assert_eq!(g.start, (0, 0));
        assert_eq!(g.goal, (1, 2));
        assert!(g.is_wall((0, 2)));
        assert_eq!(g.walls.len(), 1);
    }

    #[test]
    fn test_parse_grid_errors() {
        assert_eq!(
            parse_grid("S..;.G"),
            Err(AlgorithmError::RaggedGrid {
                row: 1,
                len: 2,
                expected: 3
            })
        );
        assert_eq!(
            parse_grid("S.x;..G"),
            Err(AlgorithmError::UnknownCell {
                ch: 'x',
                row: 0,
                col: 2
            })
        );
        assert_eq!(
            parse_grid("S.S;..G"),
            Err(AlgorithmError::GridMarker {
                marker: 'S',
                found: 2
            })
        );
        assert_eq!(
            parse_grid(""),
            Err(AlgorithmError::GridMarker {
                marker: 'S',
                found: 0
            })
        );
    }

    #[test]
    fn test_open_grid_takes_manhattan_route() {
        let trace = run(&parse_grid("S..;...;..G").unwrap());
        assert_eq!(path_length(&trace), Value::from(4));

        let last = trace.last().unwrap().snapshot.as_grid().unwrap();
        assert_eq!(last.path.first(), Some(&(0, 0)));
        assert_eq!(last.path.last(), Some(&(2, 2)));
        assert!(last
            .path
            .windows(2)
            .all(|w| manhattan(w[0], w[1]) == 1));
    }

    #[test]
    fn test_sample_maze_detours_around_walls() {
        let grid = sample_grid().unwrap();
        let trace = run(&grid);
        assert_eq!(path_length(&trace), Value::from(22));

        let last = trace.last().unwrap().snapshot.as_grid().unwrap();
        assert!(last.path.iter().all(|&c| !grid.is_wall(c)));
        assert!(last.current.is_none());
    }

    #[test]
    fn test_walled_off_goal_reports_no_path() {
        let trace = run(&parse_grid("S#.;##.;..G").unwrap());
        let last = trace.last().unwrap();
        assert_eq!(last.source_line, Some(8));
        assert_eq!(last.description, "No path from (0, 0) to (2, 2)");
        assert_eq!(path_length(&trace), Value::Null);
        assert!(last.snapshot.as_grid().unwrap().path.is_empty());
    }

    #[test]
    fn test_expansion_order_prefers_low_f() {
        let trace = run(&parse_grid("S.G").unwrap());
        let expanded: Vec<&str> = trace
            .steps()
            .filter(|s| s.description.starts_with("Expanding"))
            .map(|s| s.description.as_str())
            .collect();
        assert_eq!(
            expanded,
            vec![
                "Expanding (0, 0) with f = 0 + 2",
                "Expanding (0, 1) with f = 1 + 1",
                "Expanding (0, 2) with f = 2 + 0",
            ]
        );
    }

    #[test]
    fn test_start_on_wall_is_rejected() {
        let mut grid = GridState::new(2, 2, (0, 0), (1, 1));
        grid.walls.insert((0, 0));
        let mut rec = Recorder::new("a*");
        assert_eq!(
            astar(&grid, &mut rec),
            Err(AlgorithmError::BlockedCell { row: 0, col: 0 })
        );
        assert_eq!(
            astar(&GridState::new(2, 2, (0, 0), (5, 1)), &mut rec),
            Err(AlgorithmError::CellOutOfRange {
                row: 5,
                col: 1,
                rows: 2,
                cols: 2
            })
        );
        assert!(rec.is_empty());
    }
}
