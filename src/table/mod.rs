//! # Table Module
//!
//! In-memory representation of a two-dimensional sheet shared by all
//! pipeline stages: a rectangular grid of scalar cells with optional
//! spreadsheet-style coordinate labels attached to both axes.
mod cell;
mod labels;
mod trim;

pub use cell::CellValue;
pub use labels::{column_labels, column_letters, row_labels};

/// A rectangular grid of cells with optional coordinate labels.
///
/// Every row has the same length. Labels, once attached, travel with their
/// rows and columns through trimming and are never renumbered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<CellValue>>,
    row_labels: Option<Vec<String>>,
    column_labels: Option<Vec<String>>,
}

impl Table {
    /// Builds a table from rows, padding shorter rows with empty cells so
    /// the rectangular invariant holds.
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self {
            rows,
            row_labels: None,
            column_labels: None,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_labels(&self) -> Option<&[String]> {
        self.row_labels.as_deref()
    }

    pub fn column_labels(&self) -> Option<&[String]> {
        self.column_labels.as_deref()
    }

    pub fn has_labels(&self) -> bool {
        self.row_labels.is_some() && self.column_labels.is_some()
    }

    /// Attaches coordinate labels computed from the current dimensions:
    /// rows "1".."R" and columns "A", "B", ..., "AA", ...
    ///
    /// Must be called before trimming for the labels to describe original
    /// sheet geometry. Calling it again keeps existing labels untouched, so
    /// an already annotated and trimmed table cannot be renumbered.
    pub fn annotate(&mut self) {
        if self.row_labels.is_none() {
            self.row_labels = Some(labels::row_labels(self.height()));
        }
        if self.column_labels.is_none() {
            self.column_labels = Some(labels::column_labels(self.width()));
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Vec<CellValue>>, Option<Vec<String>>, Option<Vec<String>>) {
        (self.rows, self.row_labels, self.column_labels)
    }

    pub(crate) fn from_parts(
        rows: Vec<Vec<CellValue>>,
        row_labels: Option<Vec<String>>,
        column_labels: Option<Vec<String>>,
    ) -> Self {
        Self {
            rows,
            row_labels,
            column_labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_pads_to_rectangle() {
        let table = Table::from_rows(vec![
            vec![CellValue::Number(1.0)],
            vec![CellValue::Number(2.0), CellValue::Number(3.0)],
        ]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.rows()[0][1], CellValue::Empty);
    }

    #[test]
    fn annotate_uses_current_dimensions() {
        let mut table = Table::from_rows(vec![vec![CellValue::Empty; 3]; 2]);
        table.annotate();
        assert_eq!(table.row_labels(), Some(&["1".to_owned(), "2".to_owned()][..]));
        assert_eq!(
            table.column_labels(),
            Some(&["A".to_owned(), "B".to_owned(), "C".to_owned()][..])
        );
    }

    #[test]
    fn annotate_twice_keeps_existing_labels() {
        let mut table = Table::from_rows(vec![vec![CellValue::Number(1.0), CellValue::Empty]]);
        table.annotate();
        let mut table = table.trim();
        table.annotate();
        assert_eq!(table.column_labels(), Some(&["A".to_owned()][..]));
    }

    #[test]
    fn empty_table() {
        let table = Table::default();
        assert_eq!(table.height(), 0);
        assert_eq!(table.width(), 0);
        assert!(!table.has_labels());
    }
}
