//! # Spreadsheet Loading Module
//!
//! Loads workbook bytes or files into the in-memory table model. Format
//! detection, zip/XML handling and cell decoding are delegated to calamine;
//! this module turns each worksheet range into a rectangular [`Table`]
//! anchored at cell A1 so coordinate labels describe true sheet positions.
use crate::table::{CellValue, Table};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use thiserror::Error;

/// Errors raised while opening or reading a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("{0}")]
    CalamineError(#[from] calamine::Error),
}

/// A named, ordered collection of sheets loaded from spreadsheet bytes.
///
/// Sheet order matches the workbook and is preserved into produced output.
#[derive(Debug, Default)]
pub struct Workbook {
    sheets: Vec<(String, Table)>,
}

impl Workbook {
    /// Opens a workbook from a file path. The format (.xlsx, .xlsm, .xlsb,
    /// .xls, .ods) is detected automatically.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SpreadsheetError> {
        let workbook = open_workbook_auto(path)?;
        Self::from_sheets(workbook)
    }

    /// Opens a workbook from raw bytes, sniffing the format from content.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SpreadsheetError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(data))?;
        Self::from_sheets(workbook)
    }

    /// Loads every sheet, in workbook order, with no header-row inference:
    /// row 0 of each sheet is data, not column names.
    fn from_sheets<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<Self, SpreadsheetError> {
        let names = workbook.sheet_names().to_owned();
        let mut sheets = Vec::with_capacity(names.len());
        for name in names {
            let range = workbook.worksheet_range(&name)?;
            sheets.push((name, to_table(&range)));
        }
        Ok(Self { sheets })
    }

    pub fn sheets(&self) -> &[(String, Table)] {
        &self.sheets
    }

    pub fn into_sheets(self) -> Vec<(String, Table)> {
        self.sheets
    }
}

/// Converts a worksheet range to a table spanning from A1 to the last used
/// cell, so that row and column indexes line up with sheet coordinates even
/// when the used range starts below or right of A1.
fn to_table(range: &Range<Data>) -> Table {
    let Some(end) = range.end() else {
        return Table::default();
    };
    let mut rows = Vec::with_capacity(end.0 as usize + 1);
    for row in 0..=end.0 {
        let mut cells = Vec::with_capacity(end.1 as usize + 1);
        for column in 0..=end.1 {
            let value = range
                .get_value((row, column))
                .map(CellValue::from)
                .unwrap_or_default();
            cells.push(value);
        }
        rows.push(cells);
    }
    Table::from_rows(rows)
}
