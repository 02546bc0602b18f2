//! Column definitions.

use crate::error::TableError;
use crossterm::style::Color;

/// One table column: header caption, optional colors, width factor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    header: String,
    width_factor: u32,
    /// Overrides the theme header color for this column.
    pub header_color: Option<Color>,
    /// Overrides the theme row color for this column.
    pub row_color: Option<Color>,
}

impl ColumnSpec {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            width_factor: 1,
            header_color: None,
            row_color: None,
        }
    }

    /// Set the relative width used in fixed (non-autosize) layout.
    ///
    /// Factors must be at least 1.
    pub fn with_width_factor(mut self, factor: u32) -> Result<Self, TableError> {
        if factor < 1 {
            return Err(TableError::Configuration(format!(
                "width factor for column `{}` must be at least 1, got {factor}",
                self.header
            )));
        }
        self.width_factor = factor;
        Ok(self)
    }

    pub fn with_header_color(mut self, color: Color) -> Self {
        self.header_color = Some(color);
        self
    }

    pub fn with_row_color(mut self, color: Color) -> Self {
        self.row_color = Some(color);
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn width_factor(&self) -> u32 {
        self.width_factor
    }
}
