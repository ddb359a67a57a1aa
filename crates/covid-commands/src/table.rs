//! Bordered plain-text tables in the PrettyTable layout.

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
}

/// A table with one header row and any number of body rows. Headers are
/// centered, body cells follow their column's alignment.
///
/// ```text
/// +------------+---------+
/// | Vaccinated |  Count  |
/// +------------+---------+
/// | 1-shot     |         |
/// | - Today    |   1,234 |
/// +------------+---------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Creates a table with left-aligned columns.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let align = vec![Align::Left; headers.len()];
        Self {
            headers,
            align,
            rows: Vec::new(),
        }
    }

    /// Sets the alignment of column `column`; out-of-range columns are ignored.
    #[must_use]
    pub fn with_align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.align.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Appends a row, padding or truncating it to the header width.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Number of body rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no body rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn push_rule(out: &mut String, widths: &[usize]) {
        out.push('+');
        for width in widths {
            out.push_str(&"-".repeat(width + 2));
            out.push('+');
        }
        out.push('\n');
    }

    /// Centers `text` in `width` columns. Odd padding leaves the extra space
    /// on the right for odd-length text and on the left otherwise.
    fn center(text: &str, width: usize) -> String {
        let len = text.chars().count();
        let excess = width.saturating_sub(len);
        let half = excess / 2;
        let (left, right) = if excess % 2 == 0 {
            (half, half)
        } else if len % 2 == 1 {
            (half, half + 1)
        } else {
            (half + 1, half)
        };
        format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
    }

    fn push_header(&self, out: &mut String, widths: &[usize]) {
        out.push('|');
        for (header, width) in self.headers.iter().zip(widths) {
            out.push(' ');
            out.push_str(&Self::center(header, *width));
            out.push_str(" |");
        }
        out.push('\n');
    }

    fn push_row(&self, out: &mut String, cells: &[String], widths: &[usize]) {
        out.push('|');
        for ((cell, width), align) in cells.iter().zip(widths).zip(&self.align) {
            let pad = width - cell.chars().count();
            out.push(' ');
            match align {
                Align::Left => {
                    out.push_str(cell);
                    out.push_str(&" ".repeat(pad));
                }
                Align::Right => {
                    out.push_str(&" ".repeat(pad));
                    out.push_str(cell);
                }
            }
            out.push_str(" |");
        }
        out.push('\n');
    }

    /// Renders the table without a trailing newline.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();
        Self::push_rule(&mut out, &widths);
        self.push_header(&mut out, &widths);
        Self::push_rule(&mut out, &widths);
        for row in &self.rows {
            self.push_row(&mut out, row, &widths);
        }
        Self::push_rule(&mut out, &widths);
        out.pop();
        out
    }
}

impl std::fmt::Display for TextTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
