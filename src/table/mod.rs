//! Bordered, colored tables laid out within a fixed character budget.
//!
//! Rendering is split in two: [`Table::layout`] resolves per-column widths,
//! [`Table::render`] turns the layout plus cell text into [`DrawOp`]s. Both are
//! pure; [`Table::write`] applies the ops to a [`Console`] under one lock.

mod column;
pub mod layout;
mod theme;

pub use column::ColumnSpec;
pub use layout::TableLayout;
pub use theme::TableTheme;

use crate::console::{Console, DrawOp};
use crate::error::TableError;
use crate::term::NEWLINE;
use crate::text::{align_center, visible_width};
use crossterm::style::Color;

/// Column definitions, theme, and sizing mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<ColumnSpec>,
    theme: TableTheme,
    autosize: bool,
}

impl Table {
    /// Table sized by the columns' width factors.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            theme: TableTheme::default(),
            autosize: false,
        }
    }

    /// Table with plain header captions, sized to its content.
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = headers.into_iter().map(ColumnSpec::new).collect();
        Self {
            autosize: true,
            ..Self::new(columns)
        }
    }

    pub fn with_theme(mut self, theme: TableTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_autosize(mut self, autosize: bool) -> Self {
        self.autosize = autosize;
        self
    }

    pub fn set_autosize(&mut self, autosize: bool) {
        self.autosize = autosize;
    }

    pub fn is_autosize(&self) -> bool {
        self.autosize
    }

    pub fn theme(&self) -> &TableTheme {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut TableTheme {
        &mut self.theme
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Resolve column widths and centering pad for `total_width`.
    pub fn layout<R, S>(&self, total_width: usize, rows: &[R]) -> Result<TableLayout, TableError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let columns = layout::column_count(self.columns.len(), rows);
        let usable_width = layout::usable_width(total_width, columns)?;

        let weights = if self.autosize {
            layout::autosize_weights(&self.content_needs(columns, rows), usable_width)
        } else {
            let factors: Vec<u32> = self.columns.iter().map(ColumnSpec::width_factor).collect();
            layout::fixed_weights(&factors, columns)
        };
        let column_widths = layout::column_widths(&weights, usable_width);
        let start_padding = layout::start_padding(usable_width, &column_widths);

        tracing::debug!(
            total_width,
            columns,
            usable_width,
            autosize = self.autosize,
            ?column_widths,
            start_padding,
            "table layout resolved"
        );

        Ok(TableLayout {
            usable_width,
            column_widths,
            start_padding,
        })
    }

    /// Longest cell per column, header included.
    fn content_needs<R, S>(&self, columns: usize, rows: &[R]) -> Vec<usize>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        (0..columns)
            .map(|i| {
                let header = self
                    .columns
                    .get(i)
                    .map_or(0, |column| visible_width(column.header()));
                rows.iter()
                    .filter_map(|row| row.as_ref().get(i))
                    .map(|cell| visible_width(cell.as_ref()))
                    .fold(header, usize::max)
            })
            .collect()
    }

    /// Produce the drawing ops for the whole table.
    pub fn render<R, S>(&self, total_width: usize, rows: &[R]) -> Result<Vec<DrawOp>, TableError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let layout = self.layout(total_width, rows)?;
        let mut canvas = Canvas {
            theme: &self.theme,
            widths: &layout.column_widths,
            padding: " ".repeat(layout.start_padding),
            ops: Vec::new(),
        };

        let has_header = !self.columns.is_empty();
        let has_rows = !rows.is_empty();

        canvas.top_border(has_header);
        if has_header {
            canvas.header_row(&self.columns);
            canvas.rule(
                self.theme.border_header_left,
                self.theme.header_horizontal_separator,
                self.theme.header_cross,
                self.theme.border_header_right,
            );
        }
        for (index, row) in rows.iter().enumerate() {
            if index > 0 {
                canvas.rule(
                    self.theme.border_row_left,
                    self.theme.row_horizontal_separator,
                    self.theme.row_cross,
                    self.theme.border_row_right,
                );
            }
            canvas.data_row(&self.columns, row.as_ref());
        }
        canvas.bottom_border(has_rows);

        Ok(canvas.ops)
    }

    /// Render at the console's buffer width and write it.
    pub fn write<R, S>(&self, console: &Console, rows: &[R]) -> Result<(), TableError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let width = console.buffer_width()?;
        self.write_with_width(console, usize::from(width), rows)
    }

    /// Render at an explicit width and write it.
    pub fn write_with_width<R, S>(
        &self,
        console: &Console,
        total_width: usize,
        rows: &[R],
    ) -> Result<(), TableError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let ops = self.render(total_width, rows)?;
        console.draw(&ops)?;
        Ok(())
    }
}

struct Canvas<'a> {
    theme: &'a TableTheme,
    widths: &'a [usize],
    padding: String,
    ops: Vec<DrawOp>,
}

impl Canvas<'_> {
    fn color(&mut self, color: Color) {
        self.ops.push(DrawOp::Foreground(color));
    }

    fn text(&mut self, text: impl Into<String>) {
        self.ops.push(DrawOp::Text(text.into()));
    }

    fn start_line(&mut self) {
        let padding = self.padding.clone();
        self.text(padding);
        self.color(self.theme.border_color);
    }

    fn end_line(&mut self) {
        self.text(NEWLINE);
    }

    /// Horizontal line: `left`, `fill` per column joined by `junction`, `right`.
    fn rule(&mut self, left: char, fill: char, junction: char, right: char) {
        let mut line = String::new();
        line.push(left);
        for (index, width) in self.widths.iter().enumerate() {
            if index > 0 {
                line.push(junction);
            }
            line.extend(std::iter::repeat(fill).take(*width));
        }
        line.push(right);

        self.start_line();
        self.text(line);
        self.end_line();
    }

    fn top_border(&mut self, has_header: bool) {
        let junction = if has_header {
            self.theme.border_header_top
        } else {
            self.theme.border_row_top
        };
        self.rule(
            self.theme.border_top_left,
            self.theme.border_top,
            junction,
            self.theme.border_top_right,
        );
    }

    fn bottom_border(&mut self, has_rows: bool) {
        let junction = if has_rows {
            self.theme.border_row_bottom
        } else {
            self.theme.border_header_bottom
        };
        self.rule(
            self.theme.border_bottom_left,
            self.theme.border_bottom,
            junction,
            self.theme.border_bottom_right,
        );
    }

    /// Cells between vertical borders; `cell` yields text and color per index.
    fn cells<'c>(&mut self, separator: char, cell: impl Fn(usize) -> (&'c str, Color)) {
        let widths = self.widths;
        self.start_line();
        self.text(self.theme.border_left.to_string());
        for (index, width) in widths.iter().enumerate() {
            if index > 0 {
                self.text(separator.to_string());
            }
            let (text, color) = cell(index);
            self.color(color);
            self.text(align_center(text, *width, &self.theme.text_tail));
            self.color(self.theme.border_color);
        }
        self.text(self.theme.border_right.to_string());
        self.end_line();
    }

    fn header_row(&mut self, columns: &[ColumnSpec]) {
        let fallback = self.theme.header_text_color;
        self.cells(self.theme.header_vertical_separator, |index| {
            columns.get(index).map_or(("", fallback), |column| {
                (column.header(), column.header_color.unwrap_or(fallback))
            })
        });
    }

    fn data_row<S: AsRef<str>>(&mut self, columns: &[ColumnSpec], row: &[S]) {
        let fallback = self.theme.row_text_color;
        self.cells(self.theme.row_vertical_separator, |index| {
            let text = row.get(index).map_or("", |cell| cell.as_ref());
            let color = columns
                .get(index)
                .and_then(|column| column.row_color)
                .unwrap_or(fallback);
            (text, color)
        });
    }
}
