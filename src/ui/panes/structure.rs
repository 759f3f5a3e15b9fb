//! Drawing the captured data structure
//!
//! One renderer per snapshot kind, each producing plain [`Line`]s so the pane
//! can scroll them uniformly:
//!
//! - arrays: one horizontal bar per element, colored by tag
//! - graphs: node table (state, tentative distance) followed by the edge list
//! - grids: one character cell per square, path and search sets colored
//! - trees: sideways tree, right subtree on top
//! - sequences: stack column, queue row, or linked list chain

use crate::snapshot::array::{Element, Tag};
use crate::snapshot::graph::GraphState;
use crate::snapshot::grid::{Cell, GridState};
use crate::snapshot::sequence::{SequenceKind, SequenceState};
use crate::snapshot::tree::{TreeNode, TreeSnapshot};
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::BTreeSet;

const MAX_BAR_WIDTH: usize = 40;

pub fn render_structure_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&Snapshot>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = match snapshot {
        Some(s) => format!(" {} ", s.kind_name()),
        None => " Structure ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = match snapshot {
        Some(s) => snapshot_lines(s, area.width.saturating_sub(12) as usize),
        None => vec![Line::from(Span::styled(
            "No trace loaded",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
    };

    let visible_height = area.height.saturating_sub(2) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let visible: Vec<Line> = lines.into_iter().skip(*scroll).collect();
    frame.render_widget(Paragraph::new(visible).block(block), area);
}

/// Lines for one snapshot; `width` bounds the bar length for arrays
pub fn snapshot_lines(snapshot: &Snapshot, width: usize) -> Vec<Line<'static>> {
    match snapshot {
        Snapshot::Array(a) => array_lines(&a.elements, width),
        Snapshot::Graph(g) => graph_lines(g),
        Snapshot::Grid(g) => grid_lines(g),
        Snapshot::Tree(t) => tree_lines(t),
        Snapshot::Sequence(s) => sequence_lines(s),
    }
}

fn tag_style(tag: Tag) -> Style {
    let style = Style::default().fg(DEFAULT_THEME.tag_color(tag));
    if tag == Tag::Normal {
        style
    } else {
        style.add_modifier(Modifier::BOLD)
    }
}

fn array_lines(elements: &[Element], width: usize) -> Vec<Line<'static>> {
    let max_abs = elements
        .iter()
        .map(|e| e.value.unsigned_abs())
        .max()
        .unwrap_or(0)
        .max(1);
    let bar_width = width.clamp(1, MAX_BAR_WIDTH) as u64;

    elements
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let len = (e.value.unsigned_abs() * bar_width).div_ceil(max_abs) as usize;
            let glyph = if e.value < 0 { "░" } else { "█" };
            Line::from(vec![
                Span::styled(format!("{:>3} ", i), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(format!("{:>6} ", e.value), tag_style(e.tag)),
                Span::styled(glyph.repeat(len), tag_style(e.tag)),
            ])
        })
        .collect()
}

fn graph_lines(g: &GraphState) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "Nodes",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for node in 0..g.node_count() {
        let (marker, style) = if g.current_node == Some(node) {
            ("◆", Style::default().fg(DEFAULT_THEME.comparing).add_modifier(Modifier::BOLD))
        } else if g.visited_nodes.contains(&node) {
            ("●", Style::default().fg(DEFAULT_THEME.success))
        } else {
            ("○", Style::default().fg(DEFAULT_THEME.fg))
        };
        let mut spans = vec![Span::styled(format!("  {} {}", marker, node), style)];
        if let Some(d) = g.distances.get(&node) {
            spans.push(Span::styled(
                format!("  dist {}", d),
                Style::default().fg(DEFAULT_THEME.number),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Edges",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let n = g.node_count();
    for from in 0..n {
        for to in 0..n {
            let Some(w) = g.weight(from, to) else {
                continue;
            };
            // symmetric pairs are drawn once
            let mirrored = g.weight(to, from) == Some(w);
            if mirrored && to < from {
                continue;
            }
            let touches = |edge: (usize, usize)| {
                edge == (from, to) || (mirrored && edge == (to, from))
            };
            let style = if g.current_edge.is_some_and(touches) {
                Style::default().fg(DEFAULT_THEME.comparing).add_modifier(Modifier::BOLD)
            } else if g.visited_edges.iter().any(|&e| touches(e)) {
                Style::default().fg(DEFAULT_THEME.success)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            let arrow = if mirrored { "──" } else { "─▶" };
            lines.push(Line::from(Span::styled(
                format!("  {} {}{}{} {}", from, arrow, w, arrow, to),
                style,
            )));
        }
    }
    lines
}

fn grid_lines(g: &GridState) -> Vec<Line<'static>> {
    let path: BTreeSet<Cell> = g.path.iter().copied().collect();
    let glyph = |cell: Cell| {
        if g.is_wall(cell) {
            ("██", DEFAULT_THEME.border_normal)
        } else if g.current == Some(cell) {
            ("◆ ", DEFAULT_THEME.comparing)
        } else if g.neighbor == Some(cell) {
            ("+ ", DEFAULT_THEME.secondary)
        } else if cell == g.start {
            ("S ", DEFAULT_THEME.keyword)
        } else if cell == g.goal {
            ("G ", DEFAULT_THEME.keyword)
        } else if path.contains(&cell) {
            ("* ", DEFAULT_THEME.success)
        } else if g.closed.contains(&cell) {
            ("· ", DEFAULT_THEME.primary)
        } else if g.open.contains(&cell) {
            ("○ ", DEFAULT_THEME.function)
        } else {
            (". ", DEFAULT_THEME.comment)
        }
    };

    let mut lines: Vec<Line<'static>> = (0..g.rows)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..g.cols)
                .map(|col| {
                    let (text, color) = glyph((row, col));
                    Span::styled(text, Style::default().fg(color))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "open {}  closed {}  path {}",
            g.open.len(),
            g.closed.len(),
            g.path.len()
        ),
        Style::default().fg(DEFAULT_THEME.comment),
    )));
    lines
}

fn tree_lines(t: &TreeSnapshot) -> Vec<Line<'static>> {
    fn push(node: &TreeNode, depth: usize, lines: &mut Vec<Line<'static>>) {
        if let Some(right) = &node.right {
            push(right, depth + 1, lines);
        }
        let style = if node.highlighted {
            Style::default().fg(DEFAULT_THEME.comparing).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.primary)
        };
        let indent = "     ".repeat(depth);
        let branch = if depth == 0 { "" } else { "└─ " };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", indent, branch), Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(format!("({})", node.value), style),
        ]));
        if let Some(left) = &node.left {
            push(left, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    match &t.root {
        Some(root) => push(root, 0, &mut lines),
        None => lines.push(Line::from(Span::styled(
            "(empty tree)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))),
    }
    lines
}

fn sequence_lines(s: &SequenceState) -> Vec<Line<'static>> {
    let header = Line::from(Span::styled(
        format!("{} ({}/{})", s.kind.name(), s.len(), s.capacity),
        Style::default().fg(DEFAULT_THEME.comment),
    ));
    let cell = |e: &Element| Span::styled(format!("[{:^5}]", e.value), tag_style(e.tag));

    let mut lines = vec![header];
    if s.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("(empty {})", s.kind.name()),
            Style::default().fg(DEFAULT_THEME.comment),
        )));
        return lines;
    }

    match s.kind {
        SequenceKind::Stack => {
            for (i, e) in s.elements.iter().enumerate().rev() {
                let mut spans = vec![cell(e)];
                if i + 1 == s.len() {
                    spans.push(Span::styled(" ← top", Style::default().fg(DEFAULT_THEME.secondary)));
                }
                lines.push(Line::from(spans));
            }
        }
        SequenceKind::Queue => {
            lines.push(Line::from(s.elements.iter().map(cell).collect::<Vec<_>>()));
            let width = 7 * s.len();
            lines.push(Line::from(Span::styled(
                format!("{:<w$}", "↑ front", w = width.saturating_sub(6)) + "rear ↑",
                Style::default().fg(DEFAULT_THEME.secondary),
            )));
        }
        SequenceKind::LinkedList => {
            let mut spans = vec![Span::styled("head → ", Style::default().fg(DEFAULT_THEME.secondary))];
            for e in &s.elements {
                spans.push(cell(e));
                spans.push(Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment)));
            }
            spans.push(Span::styled("null", Style::default().fg(DEFAULT_THEME.number)));
            lines.push(Line::from(spans));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::array::{elements_from, ArraySnapshot};
    use crate::snapshot::tree::Bst;
    use crate::snapshot::Capture;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_array_bars_scale_to_largest() {
        let snap = Snapshot::Array(ArraySnapshot {
            elements: elements_from(&[10, 5, -10]),
        });
        let lines = snapshot_lines(&snap, 20);
        assert_eq!(lines.len(), 3);
        assert!(text(&lines[0]).ends_with(&"█".repeat(20)));
        assert!(text(&lines[1]).ends_with(&"█".repeat(10)));
        assert!(text(&lines[2]).ends_with(&"░".repeat(20)));
    }

    #[test]
    fn test_tree_is_drawn_sideways() {
        let snap = Bst::from_values(&[2, 1, 3]).capture();
        let rows: Vec<String> = snapshot_lines(&snap, 40).iter().map(text).collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].ends_with("(3)"));
        assert_eq!(rows[1], "(2)");
        assert!(rows[2].ends_with("(1)"));
    }

    #[test]
    fn test_symmetric_edges_listed_once() {
        let g = GraphState::new(vec![vec![0, 3], vec![3, 0]]);
        let rows: Vec<String> = graph_lines(&g).iter().map(text).collect();
        assert_eq!(rows.iter().filter(|r| r.contains("──3──")).count(), 1);
    }

    #[test]
    fn test_grid_cells() {
        let mut g = GridState::new(2, 3, (0, 0), (1, 2));
        g.walls.insert((0, 1));
        g.closed.insert((1, 0));
        g.open.insert((1, 1));
        let rows: Vec<String> = grid_lines(&g).iter().map(text).collect();
        assert_eq!(rows[0], "S ██. ");
        assert_eq!(rows[1], "· ○ G ");
        assert_eq!(rows[3], "open 1  closed 1  path 0");

        g.path = vec![(0, 0), (1, 0), (1, 1), (1, 2)];
        g.open.clear();
        let rows: Vec<String> = grid_lines(&g).iter().map(text).collect();
        assert_eq!(rows[1], "* * G ");
    }

    #[test]
    fn test_linked_list_chain() {
        let s = SequenceState::new(SequenceKind::LinkedList, &[1, 2]);
        let rows: Vec<String> = sequence_lines(&s).iter().map(text).collect();
        assert_eq!(rows[1], "head → [  1  ] → [  2  ] → null");
    }
}
