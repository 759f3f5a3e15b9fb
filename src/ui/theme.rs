//! Color palette shared by every pane

use crate::snapshot::array::Tag;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    /// Calls in the pseudo-code listing
    pub function: Color,

    // Element states
    pub comparing: Color,
    pub pivot: Color,
    pub minimum: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),        // Mauve
    number: Color::Rgb(250, 179, 135),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(88, 91, 112),
    current_line_bg: Color::Rgb(49, 50, 68),
    function: Color::Rgb(137, 220, 235),       // Sky
    comparing: Color::Rgb(249, 226, 175),      // Yellow
    pivot: Color::Rgb(245, 194, 231),          // Pink
    minimum: Color::Rgb(148, 226, 213),        // Teal
};

impl Theme {
    /// Color for an element carrying `tag`
    pub fn tag_color(&self, tag: Tag) -> Color {
        match tag {
            Tag::Normal => self.primary,
            Tag::Comparing => self.comparing,
            Tag::Swapping => self.error,
            Tag::Sorted => self.success,
            Tag::Pivot => self.pivot,
            Tag::Min => self.minimum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_distinguishable() {
        let tags = [
            Tag::Normal,
            Tag::Comparing,
            Tag::Swapping,
            Tag::Sorted,
            Tag::Pivot,
            Tag::Min,
        ];
        for (i, a) in tags.iter().enumerate() {
            for b in &tags[i + 1..] {
                assert_ne!(DEFAULT_THEME.tag_color(*a), DEFAULT_THEME.tag_color(*b));
            }
        }
    }
}
