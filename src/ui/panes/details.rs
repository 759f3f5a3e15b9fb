//! Step description and metadata pane

use crate::trace::Step;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;

/// Compact rendering of a metadata value: strings unquoted, `null` as a dash
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
        other => other.to_string(),
    }
}

pub fn metadata_items(step: &Step) -> Vec<ListItem<'static>> {
    step.metadata
        .iter()
        .map(|(key, value)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}: ", key),
                    Style::default().fg(DEFAULT_THEME.keyword),
                ),
                Span::styled(format_value(value), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect()
}

/// Render the description of the current step above its metadata
pub fn render_details_pane(
    frame: &mut Frame,
    area: Rect,
    step: Option<&Step>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Step ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let Some(step) = step else {
        let paragraph = Paragraph::new("(no step)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let description_height = 2.min(inner.height);
    let description = Paragraph::new(step.description.as_str())
        .style(
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(
        description,
        Rect {
            height: description_height,
            ..inner
        },
    );

    let items = metadata_items(step);
    let list_area = Rect {
        y: inner.y + description_height,
        height: inner.height - description_height,
        ..inner
    };
    let visible_height = list_area.height.max(1) as usize;
    if items.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(items.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible: Vec<ListItem> = items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();
    frame.render_widget(List::new(visible), list_area);
}
