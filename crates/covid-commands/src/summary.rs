//! Summary model and its messaging markup.

use crate::table::{Align, TextTable};
use chrono::NaiveDate;

/// One line of a summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryRow {
    /// Section header with an empty value cell.
    Section(String),
    /// Label and formatted value.
    Value(String, String),
}

/// A titled, dated table of grouped label/value rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Bold heading above the table
    pub title: String,
    /// Day the numbers describe
    pub as_of: NaiveDate,
    /// Column headers, label first.
    pub header: (String, String),
    /// Sections and values in display order
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    /// Creates an empty summary with the given column headers
    pub fn new(
        title: impl Into<String>,
        as_of: NaiveDate,
        label_header: impl Into<String>,
        value_header: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            as_of,
            header: (label_header.into(), value_header.into()),
            rows: Vec::new(),
        }
    }

    /// Starts a new section.
    pub fn section(&mut self, name: impl Into<String>) -> &mut Self {
        self.rows.push(SummaryRow::Section(name.into()));
        self
    }

    /// Adds a row to the current section.
    pub fn row(&mut self, label: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.rows.push(SummaryRow::Value(label.into(), value.into()));
        self
    }

    /// Value of the first row called `label` after section `section`.
    pub fn value(&self, section: &str, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .skip_while(|row| !matches!(row, SummaryRow::Section(s) if s == section))
            .skip(1)
            .take_while(|row| matches!(row, SummaryRow::Value(..)))
            .find_map(|row| match row {
                SummaryRow::Value(l, v) if l == label => Some(v.as_str()),
                _ => None,
            })
    }

    /// The table part alone.
    pub fn table(&self) -> TextTable {
        let mut table = TextTable::new([self.header.0.as_str(), self.header.1.as_str()])
            .with_align(0, Align::Left)
            .with_align(1, Align::Right);
        for row in &self.rows {
            match row {
                SummaryRow::Section(name) => table.add_row([name.as_str(), ""]),
                SummaryRow::Value(label, value) => table.add_row([label.as_str(), value.as_str()]),
            }
        }
        table
    }

    /// `<b>title</b>\n<i>(as of date)</i>\n<pre>table</pre>`
    pub fn render(&self) -> String {
        format!(
            "<b>{}</b>\n<i>(as of {})</i>\n<pre>{}</pre>",
            escape_html(&self.title),
            self.as_of.format("%Y-%m-%d"),
            escape_html(&self.table().render())
        )
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Escapes the characters Telegram's HTML mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
