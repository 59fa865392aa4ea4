use thiserror::Error;

/// Main error type for the sheetdoc pipeline.
/// Aggregates errors from the loading, rendering and conversion modules.
#[derive(Error, Debug)]
pub enum SheetDocError {
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    RenderError(#[from] crate::render::RenderError),

    #[error("{0}")]
    ConvertError(#[from] crate::convert::ConvertError),
}
