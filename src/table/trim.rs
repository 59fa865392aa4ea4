use crate::table::{CellValue, Table};

impl Table {
    /// Removes fully-empty columns, then fully-empty rows.
    ///
    /// The order is significant: a row may only become fully empty once the
    /// irrelevant empty columns are gone. Surviving rows and columns keep
    /// their relative order and their coordinate labels; labels of dropped
    /// rows and columns are discarded, never renumbered.
    pub fn trim(self) -> Table {
        let (rows, row_labels, column_labels) = self.into_parts();
        let width = rows.first().map(Vec::len).unwrap_or(0);

        let kept_columns: Vec<usize> = (0..width)
            .filter(|&column| rows.iter().any(|row| !row[column].is_empty()))
            .collect();

        let column_labels = column_labels.map(|labels| {
            kept_columns
                .iter()
                .map(|&column| labels[column].clone())
                .collect()
        });

        let mut kept_rows: Vec<Vec<CellValue>> = Vec::new();
        let mut kept_row_labels: Vec<String> = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            let row: Vec<CellValue> = kept_columns
                .iter()
                .map(|&column| row[column].clone())
                .collect();
            if row.iter().all(CellValue::is_empty) {
                continue;
            }
            if let Some(labels) = &row_labels {
                kept_row_labels.push(labels[index].clone());
            }
            kept_rows.push(row);
        }

        let row_labels = row_labels.map(|_| kept_row_labels);
        Table::from_parts(kept_rows, row_labels, column_labels)
    }
}
