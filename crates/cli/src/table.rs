//! Plain-text tables
//!
//! Columns are padded to their widest cell. When the table is wider than
//! the terminal the widest columns are truncated with `…` until it fits.

use console::{measure_text_width, pad_str, truncate_str, Alignment, Term};
use owo_colors::OwoColorize;

const GAP: &str = "  ";
const MIN_COLUMN: usize = 6;

/// Rows of string cells under a header
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given column headers
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

    /// Append a row; missing cells render empty and extra cells are dropped
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self, max_width: Option<usize>) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(measure_text_width(cell));
            }
        }

        if let Some(max) = max_width {
            let gaps = GAP.len() * widths.len().saturating_sub(1);
            while widths.iter().sum::<usize>() + gaps > max {
                let Some(widest) = widths
                    .iter_mut()
                    .filter(|w| **w > MIN_COLUMN)
                    .max_by_key(|w| **w)
                else {
                    break;
                };
                *widest -= 1;
            }
        }
        widths
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, &w)| {
                if measure_text_width(cell) > w {
                    truncate(cell, w)
                } else {
                    pad_str(cell, w, Alignment::Left, None).into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(GAP)
            .trim_end()
            .to_string()
    }

    /// Render to lines, fitting `max_width` columns when given
    #[must_use]
    pub fn render(&self, max_width: Option<usize>) -> Vec<String> {
        let widths = self.widths(max_width);
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(Self::line(&self.headers, &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join(GAP),
        );
        for row in &self.rows {
            lines.push(Self::line(row, &widths));
        }
        lines
    }

    /// Print to stdout, sized to the terminal when there is one
    pub fn print(&self) {
        let term = Term::stdout();
        let max_width = term.is_term().then(|| usize::from(term.size().1));
        let mut lines = self.render(max_width).into_iter();
        if let Some(header) = lines.next() {
            println!("{}", header.bold());
        }
        for line in lines {
            println!("{line}");
        }
    }
}

/// Shorten `text` to `width` columns, marking the cut with `…`
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    truncate_str(text, width, "…").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["id", "name", "province"]);
        table.push_row(vec!["1".into(), "Maputo".into(), "yes".into()]);
        table.push_row(vec!["12".into(), "Quelimane".into()]);
        table
    }

    #[test]
    fn test_render_pads_columns() {
        let lines = sample().render(None);
        assert_eq!(lines[0], "id  name       province");
        assert_eq!(lines[2], "1   Maputo     yes");
        assert_eq!(lines[3], "12  Quelimane");
        assert_eq!(sample().len(), 2);
    }

    #[test]
    fn test_cell_as_wide_as_column_is_kept() {
        let mut table = Table::new(["id", "marker"]);
        table.push_row(vec!["7".into(), "*".into()]);
        table.push_row(vec!["12".into(), String::new()]);
        let lines = table.render(None);
        assert_eq!(lines[0], "id  marker");
        assert_eq!(lines[3], "12");

        let mut single = Table::new(["path"]);
        single.push_row(vec!["/entity-branches".into()]);
        assert_eq!(single.render(None)[2], "/entity-branches");
    }

    #[test]
    fn test_empty_column_renders() {
        let mut table = Table::new(["", "name"]);
        table.push_row(vec![String::new(), "Beira".into()]);
        let lines = table.render(None);
        assert_eq!(lines[2], "  Beira");
    }

    #[test]
    fn test_render_fits_width() {
        let mut table = Table::new(["id", "description"]);
        table.push_row(vec!["1".into(), "Other social work activities without accommodation".into()]);
        let lines = table.render(Some(30));
        for line in &lines {
            assert!(measure_text_width(line) <= 30, "{line}");
        }
        assert!(lines[2].ends_with('…'));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Cooperativa Agrícola", 8), "Coopera…");
        assert_eq!(truncate("CAV", 8), "CAV");
    }
}
