//! Pseudo-code pane with the current step's line highlighted
//!
//! Each algorithm ships a short code listing; a step's `source_line` points
//! into it (1-based). The pane keeps that line at a stable row while the
//! listing scrolls underneath it.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Light highlighting for the pseudo-code listings
fn highlight_pseudo_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let flush = |word: &mut String, next: Option<char>, spans: &mut Vec<Span<'_>>| {
        if !word.is_empty() {
            let style = word_style(word, next == Some('('));
            spans.push(Span::styled(std::mem::take(word), style));
        }
    };

    let chars: Vec<char> = line.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() || c == '_' {
            current_word.push(c);
            continue;
        }
        flush(&mut current_word, Some(c), &mut spans);

        let style = match c {
            '(' | ')' | '[' | ']' | '{' | '}' => Style::default().fg(DEFAULT_THEME.primary),
            ':' if i + 1 == chars.len() => Style::default().fg(DEFAULT_THEME.comment),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(c.to_string(), style));
    }
    flush(&mut current_word, None, &mut spans);

    Line::from(spans)
}

fn word_style(word: &str, is_call: bool) -> Style {
    match word {
        "for" | "in" | "while" | "if" | "else" | "return" | "and" | "or" | "not" | "repeat"
        | "times" | "done" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "null" | "inf" | "true" | "false" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_call => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to (None = center on first draw)
    pub target_line_row: Option<usize>,
}

/// Render the code listing for the current algorithm
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    listing: &[&str],
    current_line: Option<u32>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = listing.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    let current = current_line.map_or(0, |l| l as usize);
    if current > 0 && current <= total_lines {
        scroll_state.offset = (current - 1).saturating_sub(target_row);
        if total_lines > visible_height {
            scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = listing
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current;

            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut content = highlight_pseudo_code(line);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlighting_preserves_text() {
        for src in ["for i in 0..n - 1:", "    swap(a[j], a[j + 1])", "done"] {
            assert_eq!(text(&highlight_pseudo_code(src)), src);
        }
    }

    #[test]
    fn test_keywords_are_bold() {
        let line = highlight_pseudo_code("while queue is not empty:");
        let while_span = &line.spans[0];
        assert_eq!(while_span.content, "while");
        assert!(while_span.style.add_modifier.contains(Modifier::BOLD));
    }
}
