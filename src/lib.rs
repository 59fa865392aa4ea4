//! # Sheetdoc
//!
//! Document-pipeline stages for spreadsheet-backed retrieval workflows:
//! a tabular extraction engine that flattens workbooks into indexable text
//! documents, and a reference resolver that appends deep links back into
//! the cited sources.
//!
//! ## Features
//!
//! - **Multi-format support**: Read Excel files (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`)
//!   and OpenDocument spreadsheet files (`.ods`) from paths or raw bytes
//! - **One document per sheet**: Sheet order and `sheet_name` metadata preserved
//! - **Sparsity trimming**: Fully-empty rows and columns are dropped before rendering
//! - **Coordinate identity**: Optional spreadsheet-style row numbers and column
//!   letters that survive trimming without renumbering
//! - **Variant rendering**: CSV or markdown output behind a single configuration value
//! - **Batch isolation**: Unreadable or unparseable sources are logged, reported
//!   and skipped without aborting the batch
//! - **Deep-link footnotes**: Citations resolved to numbered markdown links, with
//!   sheet (`gid`) and row (`range`) anchors for spreadsheet-hosted sources
mod augment;
mod convert;
mod document;
mod error;
mod render;
mod spreadsheet;
mod table;

pub use augment::{Answer, LinkResolver, Reference, REFERENCES_KEY};
pub use convert::{
    ByteStream, ConvertError, Extraction, SkippedSource, Source, SourceMetadata, TabularExtractor,
    SHEET_NAME_KEY,
};
pub use document::{Document, Metadata};
pub use error::SheetDocError;
pub use render::{render, RenderError, RenderOptions, FORMAT_CSV, FORMAT_MARKDOWN};
pub use spreadsheet::{SpreadsheetError, Workbook};
pub use table::{column_labels, column_letters, row_labels, CellValue, Table};
