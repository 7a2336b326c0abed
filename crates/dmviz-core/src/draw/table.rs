//! Summary tables rendered as aligned columns or as stacked cards.

use super::{
    border::{BorderPosition, BorderStyle, boxed_line, draw_border},
    glyph::PLACEHOLDER,
    layout::Layout,
    text::{display_width, pad},
};

const ROW_INDENT: &str = "  ";
const COLUMN_GAP: &str = " ";

/// Ordered rows of ordered column values under a header row.
///
/// Missing or empty cells render as [`PLACEHOLDER`]. Cells beyond the number
/// of headers are ignored.
///
/// # Examples
///
/// ```
/// # use dmviz_core::draw::{Layout, Table};
/// let mut table = Table::new(["ID", "Name"]);
/// table.push_row(["1", "Forward_L_Medium"]);
/// table.push_row(["2", ""]);
///
/// let lines = table.render(Layout::Wide, 100);
/// assert_eq!(lines[0], "  ID Name");
/// assert_eq!(lines[3], "  2  -");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given column headers and no rows.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Returns the column headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-column width: the widest of the header and every cell in that column.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                (0..self.rows.len())
                    .map(|row| display_width(self.cell(row, col)))
                    .fold(display_width(header), usize::max)
            })
            .collect()
    }

    /// Renders the table for `layout`.
    ///
    /// [`Layout::Wide`] produces an indented header, a separator row and one
    /// aligned line per row. The last column is not padded. [`Layout::Compact`] produces one bordered card
    /// of `width` columns per row with a `Header: value` line per column.
    pub fn render(&self, layout: Layout, width: usize) -> Vec<String> {
        match layout {
            Layout::Wide => self.render_wide(),
            Layout::Compact => self.render_compact(width),
        }
    }

    fn cell(&self, row: usize, col: usize) -> &str {
        self.rows[row]
            .get(col)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(PLACEHOLDER)
    }

    fn render_wide(&self) -> Vec<String> {
        let widths = self.column_widths();
        let last = widths.len().saturating_sub(1);
        let aligned = |col: usize, text: &str| {
            if col == last {
                text.to_string()
            } else {
                pad(text, widths[col])
            }
        };
        let format_line = |cells: Vec<String>| format!("{ROW_INDENT}{}", cells.join(COLUMN_GAP));

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format_line(
            self.headers
                .iter()
                .enumerate()
                .map(|(col, header)| aligned(col, header))
                .collect(),
        ));
        lines.push(format_line(widths.iter().map(|width| "─".repeat(*width)).collect()));
        for row in 0..self.rows.len() {
            lines.push(format_line(
                (0..widths.len()).map(|col| aligned(col, self.cell(row, col))).collect(),
            ));
        }
        lines
    }

    fn render_compact(&self, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for row in 0..self.rows.len() {
            lines.push(draw_border(BorderStyle::Single, BorderPosition::Top, width));
            for (col, header) in self.headers.iter().enumerate() {
                let field = format!("{header}: {}", self.cell(row, col));
                lines.push(boxed_line(BorderStyle::Single, &field, width));
            }
            lines.push(draw_border(BorderStyle::Single, BorderPosition::Bottom, width));
        }
        lines
    }
}
