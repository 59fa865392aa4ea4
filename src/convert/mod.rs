//! # Tabular Extraction Module
//!
//! Orchestrates the conversion of spreadsheet sources into plain-text
//! documents: resolve bytes, load the workbook, then per sheet annotate,
//! trim, render and attach metadata. Failing sources are logged, recorded
//! in the batch report and skipped; the rest of the batch continues.
use crate::document::{Document, Metadata};
use crate::error::SheetDocError;
use crate::render::{self, RenderOptions};
use crate::spreadsheet::Workbook;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Metadata key carrying the originating sheet name on every produced document.
pub const SHEET_NAME_KEY: &str = "sheet_name";

/// Errors raised for malformed extraction arguments.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A per-source metadata list must line up with the sources one to one.
    #[error("Expected {expected} metadata entries, one per source, but got {actual}")]
    MetadataLengthMismatch { expected: usize, actual: usize },
}

/// A pre-loaded byte buffer with metadata attached by an upstream fetcher.
#[derive(Clone, Debug, Default)]
pub struct ByteStream {
    pub data: Vec<u8>,
    pub meta: Metadata,
}

impl ByteStream {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            meta: Metadata::new(),
        }
    }

    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }
}

/// One extraction input: a file path, raw bytes, or a byte buffer with
/// attached metadata.
#[derive(Clone, Debug)]
pub enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
    Stream(ByteStream),
}

impl Source {
    /// Human-readable name used in logs and the skip report.
    fn description(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes(_) => "<bytes>".to_owned(),
            Self::Stream(_) => "<byte stream>".to_owned(),
        }
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for Source {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

impl From<ByteStream> for Source {
    fn from(stream: ByteStream) -> Self {
        Self::Stream(stream)
    }
}

/// Caller-supplied metadata: one object applied to every source, or one
/// object per source.
#[derive(Clone, Debug)]
pub enum SourceMetadata {
    Single(Metadata),
    PerSource(Vec<Metadata>),
}

/// Expands the metadata argument to exactly one entry per source.
fn normalize_metadata(
    meta: Option<SourceMetadata>,
    sources_count: usize,
) -> Result<Vec<Metadata>, ConvertError> {
    match meta {
        None => Ok(vec![Metadata::new(); sources_count]),
        Some(SourceMetadata::Single(meta)) => Ok(vec![meta; sources_count]),
        Some(SourceMetadata::PerSource(list)) => {
            if list.len() != sources_count {
                return Err(ConvertError::MetadataLengthMismatch {
                    expected: sources_count,
                    actual: list.len(),
                });
            }
            Ok(list)
        }
    }
}

/// A source dropped from the batch, with the reason it was dropped.
#[derive(Clone, Debug)]
pub struct SkippedSource {
    pub source: String,
    pub reason: String,
}

/// Result of one extraction batch: the produced documents plus the report
/// of sources that were skipped.
#[derive(Debug, Default)]
pub struct Extraction {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedSource>,
}

/// Turns spreadsheet workbooks into one document per sheet.
///
/// The output format and its options are fixed per engine instance; sources
/// and metadata vary per call. Running twice on byte-identical input yields
/// byte-identical documents.
#[derive(Clone, Debug)]
pub struct TabularExtractor {
    table_format: String,
    table_format_kwargs: IndexMap<String, Value>,
    preserve_identifiers: bool,
}

impl Default for TabularExtractor {
    fn default() -> Self {
        Self {
            table_format: render::FORMAT_CSV.to_owned(),
            table_format_kwargs: IndexMap::new(),
            preserve_identifiers: false,
        }
    }
}

impl TabularExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output format name, "csv" or "markdown". The value is validated at
    /// render time; an unknown name fails the run.
    pub fn with_table_format(mut self, format: impl Into<String>) -> Self {
        self.table_format = format.into();
        self
    }

    /// Free-form renderer option overrides.
    pub fn with_table_format_kwargs(mut self, kwargs: IndexMap<String, Value>) -> Self {
        self.table_format_kwargs = kwargs;
        self
    }

    /// When enabled, rendered tables carry spreadsheet-style row numbers and
    /// column letters computed from each sheet's untrimmed geometry.
    pub fn with_preserved_identifiers(mut self, preserve: bool) -> Self {
        self.preserve_identifiers = preserve;
        self
    }

    /// Converts each source's workbook into one document per sheet, in
    /// workbook order. Unreadable or unparseable sources are logged and
    /// skipped; an unsupported table format aborts the run.
    pub fn run(
        &self,
        sources: Vec<Source>,
        meta: Option<SourceMetadata>,
    ) -> Result<Extraction, SheetDocError> {
        let meta_list = normalize_metadata(meta, sources.len())?;
        let mut extraction = Extraction::default();

        for (source, caller_meta) in sources.into_iter().zip(meta_list) {
            let description = source.description();
            let (data, source_meta) = match source {
                Source::Path(path) => match fs::read(&path) {
                    Ok(data) => (data, Metadata::new()),
                    Err(error) => {
                        warn!(source = %description, %error, "Could not read source, skipping it");
                        extraction.skipped.push(SkippedSource {
                            source: description,
                            reason: error.to_string(),
                        });
                        continue;
                    }
                },
                Source::Bytes(data) => (data, Metadata::new()),
                Source::Stream(stream) => (stream.data, stream.meta),
            };

            let workbook = match Workbook::from_bytes(&data) {
                Ok(workbook) => workbook,
                Err(error) => {
                    warn!(source = %description, %error, "Could not parse source as a workbook, skipping it");
                    extraction.skipped.push(SkippedSource {
                        source: description,
                        reason: error.to_string(),
                    });
                    continue;
                }
            };

            for (sheet_name, mut table) in workbook.into_sheets() {
                if self.preserve_identifiers {
                    table.annotate();
                }
                let table = table.trim();

                let mut options = RenderOptions::from_kwargs(&self.table_format_kwargs);
                if self.preserve_identifiers && table.has_labels() {
                    // Computed flags encode the identifier contract and win
                    // over anything in the pass-through bag.
                    options.include_header = true;
                    options.include_index = true;
                }
                let content = render::render(&self.table_format, &table, &options)?;

                let mut merged = source_meta.clone();
                merged.extend(caller_meta.clone());
                merged.insert(SHEET_NAME_KEY.to_owned(), Value::String(sheet_name));
                extraction.documents.push(Document::new(content, merged));
            }
        }

        Ok(extraction)
    }
}
