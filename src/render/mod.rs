//! # Table Rendering Module
//!
//! Serializes tables to text in one of a closed set of variant formats,
//! selected by a configuration string. Each variant is a small strategy
//! behind a common trait; the format string is parsed at render time so an
//! unsupported value fails the call instead of being silently ignored.
use crate::table::Table;
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

mod csv;
mod markdown;

use csv::CsvRenderer;
use markdown::MarkdownRenderer;

/// Comma-separated values, one line per row. The default format.
pub const FORMAT_CSV: &str = "csv";
/// Markdown pipe-table format.
pub const FORMAT_MARKDOWN: &str = "markdown";

/// Errors raised while rendering a table to text.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The configured format value is not one of the supported variants.
    #[error("Unsupported table format '{format}', expected 'csv' or 'markdown'")]
    UnsupportedFormat { format: String },

    #[error("{0}")]
    CsvError(#[from] ::csv::Error),

    #[error("{0}")]
    EncodingError(#[from] std::string::FromUtf8Error),
}

/// Rendering options: the behaviorally-significant header/index flags as
/// named fields, plus an additive pass-through bag of cosmetic overrides
/// (for csv: `delimiter`, `terminator`).
///
/// The named fields are computed by the extraction engine when identifier
/// preservation is requested and then take precedence over any value in the
/// bag; the bag never removes behavior, it only tweaks it.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Emit a first row of column labels.
    pub include_header: bool,
    /// Emit the row label as the first column of every row.
    pub include_index: bool,
    /// Free-form renderer overrides, keyed by option name.
    pub extra: IndexMap<String, Value>,
}

impl RenderOptions {
    /// Seeds options from a free-form bag. The header/index flags may be
    /// provided as defaults here; callers that compute them overwrite the
    /// fields afterwards.
    pub fn from_kwargs(kwargs: &IndexMap<String, Value>) -> Self {
        let mut options = Self {
            extra: kwargs.clone(),
            ..Self::default()
        };
        if let Some(value) = kwargs.get("include_header").and_then(Value::as_bool) {
            options.include_header = value;
        }
        if let Some(value) = kwargs.get("include_index").and_then(Value::as_bool) {
            options.include_index = value;
        }
        options
    }

    fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

/// Strategy interface implemented once per output format.
pub(crate) trait TableRenderer {
    fn render(&self, table: &Table, options: &RenderOptions) -> Result<String, RenderError>;
}

/// Renders a table using the format named by `format`.
///
/// Unknown format values are a fatal configuration error, reported here
/// rather than at engine construction.
pub fn render(format: &str, table: &Table, options: &RenderOptions) -> Result<String, RenderError> {
    match format {
        FORMAT_CSV => CsvRenderer.render(table, options),
        FORMAT_MARKDOWN => MarkdownRenderer.render(table, options),
        _ => Err(RenderError::UnsupportedFormat {
            format: format.to_owned(),
        }),
    }
}
