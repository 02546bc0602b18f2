//! Border glyphs and colors for table rendering.

use crate::theme::ThemeColors;
use crossterm::style::Color;

/// Glyphs, colors, and truncation tail used while drawing a table.
///
/// Override individual fields with struct update syntax:
///
/// ```
/// use console_kit::table::TableTheme;
///
/// let ascii = TableTheme {
///     border_top: '-',
///     border_bottom: '-',
///     ..TableTheme::default()
/// };
/// assert_eq!(ascii.border_left, '║');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTheme {
    pub border_top: char,
    pub border_top_left: char,
    pub border_top_right: char,
    pub border_bottom: char,
    pub border_bottom_left: char,
    pub border_bottom_right: char,
    pub border_left: char,
    pub border_right: char,
    /// Top-border junction above a header row.
    pub border_header_top: char,
    /// Top-border junction above a data row (table without header).
    pub border_row_top: char,
    /// Bottom-border junction below a header row (table without rows).
    pub border_header_bottom: char,
    /// Bottom-border junction below a data row.
    pub border_row_bottom: char,
    pub border_header_left: char,
    pub border_header_right: char,
    pub border_row_left: char,
    pub border_row_right: char,
    pub header_horizontal_separator: char,
    pub header_vertical_separator: char,
    pub header_cross: char,
    pub row_horizontal_separator: char,
    pub row_vertical_separator: char,
    pub row_cross: char,
    pub border_color: Color,
    pub header_text_color: Color,
    pub row_text_color: Color,
    /// Appended to truncated cell text.
    pub text_tail: String,
}

impl Default for TableTheme {
    fn default() -> Self {
        Self {
            border_top: '═',
            border_top_left: '╔',
            border_top_right: '╗',
            border_bottom: '═',
            border_bottom_left: '╚',
            border_bottom_right: '╝',
            border_left: '║',
            border_right: '║',
            border_header_top: '╤',
            border_row_top: '╤',
            border_header_bottom: '╧',
            border_row_bottom: '╧',
            border_header_left: '╠',
            border_header_right: '╣',
            border_row_left: '╟',
            border_row_right: '╢',
            header_horizontal_separator: '═',
            header_vertical_separator: '│',
            header_cross: '╪',
            row_horizontal_separator: '─',
            row_vertical_separator: '│',
            row_cross: '┼',
            border_color: Color::DarkGrey,
            header_text_color: Color::White,
            row_text_color: Color::Grey,
            text_tail: "...".to_string(),
        }
    }
}

impl ThemeColors for TableTheme {
    const SECTION: &'static str = "table";

    fn color_slot(&mut self, key: &str) -> Option<&mut Color> {
        match key {
            "border" => Some(&mut self.border_color),
            "header" => Some(&mut self.header_text_color),
            "row" => Some(&mut self.row_text_color),
            _ => None,
        }
    }

    fn color_keys() -> &'static [&'static str] {
        &["border", "header", "row"]
    }
}
