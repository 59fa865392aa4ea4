//! # Link Augmentation Module
//!
//! Resolves an answer's citations against its source documents and appends
//! a numbered footnote block of deep links to the answer text. Spreadsheet
//! sources get sheet and row anchors reconstructed from document metadata
//! and the inline row marker embedded in the answer.
//!
//! Resolution never fails: missing citation lists, unmatched citations and
//! absent metadata fields all degrade to omission or empty strings.
use crate::document::Document;
use crate::document::Metadata;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Answer metadata key holding the citation list.
pub const REFERENCES_KEY: &str = "_references";

/// Inline positional marker the answer text carries for spreadsheet rows.
static ROW_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{Row (\d+)\}").expect("Hardcode pattern"));

/// One citation: a pointer to a source document plus the character offset
/// in the answer text where the cited span starts.
#[derive(Clone, Debug, Deserialize)]
pub struct Reference {
    pub document_id: String,
    pub answer_start_idx: usize,
}

/// A generated answer with the source documents available for citation
/// matching. The text is only ever extended, never truncated.
#[derive(Clone, Debug, Default)]
pub struct Answer {
    pub text: String,
    pub documents: Vec<Document>,
    pub meta: Metadata,
}

/// Appends deep-link footnotes to answers based on their citation lists.
#[derive(Clone, Debug, Default)]
pub struct LinkResolver;

impl LinkResolver {
    pub fn new() -> Self {
        Self
    }

    /// Extends each answer's text with one numbered footnote per resolved
    /// citation, in citation order. Answers without a citation list, and
    /// answers whose citations all miss, are left untouched.
    pub fn run(&self, answers: &mut [Answer]) {
        for answer in answers {
            let Some(references) = answer.meta.get(REFERENCES_KEY) else {
                continue;
            };
            let references: Vec<Reference> =
                serde_json::from_value(references.clone()).unwrap_or_default();

            let mut links: Vec<(String, String)> = Vec::new();
            for reference in &references {
                // First matching document wins; no match drops the citation.
                let Some(document) = answer
                    .documents
                    .iter()
                    .find(|document| document.id == reference.document_id)
                else {
                    continue;
                };
                links.push(build_link(document, &answer.text, reference.answer_start_idx));
            }

            if links.is_empty() {
                continue;
            }
            let mut footnotes = String::new();
            for (index, (link_name, url)) in links.iter().enumerate() {
                footnotes.push_str(&format!("\n\n[[Ext {}]{}]({})", index + 1, link_name, url));
            }
            answer.text.push_str(&footnotes);
        }
    }
}

/// Builds the display name and URL for one citation. Spreadsheet-hosted
/// sources (detected by a "spreadsheets" substring in the URL) get a sheet
/// anchor, and a row anchor when the answer text carries a row marker at or
/// after the citation's start offset.
fn build_link(document: &Document, text: &str, start_idx: usize) -> (String, String) {
    let mut link_name = document.meta_str("file_name");
    let mut url = document.meta_str("src_url");

    if url.contains("spreadsheets") {
        let sheet_name = document.meta_str("sheet_name");
        link_name.push_str(&format!("#{sheet_name}"));

        let gid = document
            .meta
            .get("sheet_name_id_map")
            .and_then(Value::as_object)
            .and_then(|map| map.get(&sheet_name))
            .map(|value| match value {
                Value::String(id) => id.clone(),
                Value::Number(id) => id.to_string(),
                _ => String::new(),
            })
            .unwrap_or_default();
        url.push_str(&format!("?gid={gid}#gid={gid}"));

        // The citation offset counts characters, not bytes.
        let tail = text
            .char_indices()
            .nth(start_idx)
            .map(|(offset, _)| &text[offset..])
            .unwrap_or("");
        let row = ROW_MARKER
            .captures(tail)
            .and_then(|captures| captures.get(1))
            .map(|group| group.as_str());
        if let Some(row) = row {
            link_name.push_str(&format!("!{row}:{row}"));
            url.push_str(&format!("&range={row}:{row}"));
        }
    }

    (link_name, url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(id: &str, file_name: &str, src_url: &str) -> Document {
        let mut meta = Metadata::new();
        meta.insert("file_name".to_owned(), json!(file_name));
        meta.insert("src_url".to_owned(), json!(src_url));
        Document::new("", meta).with_id(id)
    }

    fn answer_with_references(text: &str, references: Value) -> Answer {
        let mut meta = Metadata::new();
        meta.insert(REFERENCES_KEY.to_owned(), references);
        Answer {
            text: text.to_owned(),
            documents: Vec::new(),
            meta,
        }
    }

    #[test]
    fn plain_document_footnote() {
        let mut answer = answer_with_references(
            "Some answer.",
            json!([{"document_id": "d1", "answer_start_idx": 0}]),
        );
        answer.documents.push(document("d1", "doc.pdf", "http://x/doc.pdf"));

        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        assert_eq!(answer.text, "Some answer.\n\n[[Ext 1]doc.pdf](http://x/doc.pdf)");
    }

    #[test]
    fn spreadsheet_document_gets_sheet_and_row_anchors() {
        let mut answer = answer_with_references(
            "See {Row 5} for details.",
            json!([{"document_id": "d1", "answer_start_idx": 0}]),
        );
        let mut source = document("d1", "Book", "http://sheets.google.com/spreadsheets/d/X");
        source.meta.insert("sheet_name".to_owned(), json!("Sheet1"));
        source
            .meta
            .insert("sheet_name_id_map".to_owned(), json!({"Sheet1": "0"}));
        answer.documents.push(source);

        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        assert_eq!(
            answer.text,
            "See {Row 5} for details.\n\n[[Ext 1]Book#Sheet1!5:5](http://sheets.google.com/spreadsheets/d/X?gid=0#gid=0&range=5:5)"
        );
    }

    #[test]
    fn row_marker_before_start_idx_is_ignored() {
        let text = "{Row 2} early text, cited part has no marker";
        let mut answer = answer_with_references(
            text,
            json!([{"document_id": "d1", "answer_start_idx": 8}]),
        );
        let mut source = document("d1", "Book", "http://x/spreadsheets/d/X");
        source.meta.insert("sheet_name".to_owned(), json!("S"));
        answer.documents.push(source);

        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        // Sheet anchor present, no row anchor; gid defaults to empty.
        assert!(answer.text.ends_with("[[Ext 1]Book#S](http://x/spreadsheets/d/X?gid=#gid=)"));
    }

    #[test]
    fn duplicate_citations_are_numbered_separately() {
        let mut answer = answer_with_references(
            "Twice cited.",
            json!([
                {"document_id": "d1", "answer_start_idx": 0},
                {"document_id": "d1", "answer_start_idx": 3},
            ]),
        );
        answer.documents.push(document("d1", "doc.pdf", "http://x/doc.pdf"));

        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        assert_eq!(
            answer.text,
            "Twice cited.\n\n[[Ext 1]doc.pdf](http://x/doc.pdf)\n\n[[Ext 2]doc.pdf](http://x/doc.pdf)"
        );
    }

    #[test]
    fn answers_without_references_are_untouched() {
        let mut answer = Answer {
            text: "No refs.".to_owned(),
            ..Answer::default()
        };
        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        assert_eq!(answer.text, "No refs.");
    }

    #[test]
    fn unmatched_citations_are_dropped_silently() {
        let mut answer = answer_with_references(
            "Answer.",
            json!([{"document_id": "missing", "answer_start_idx": 0}]),
        );
        answer.documents.push(document("d1", "doc.pdf", "http://x/doc.pdf"));

        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        // No match resolved, so no footnote block at all.
        assert_eq!(answer.text, "Answer.");
    }

    #[test]
    fn missing_metadata_defaults_to_empty_strings() {
        let mut answer = answer_with_references(
            "Answer.",
            json!([{"document_id": "d1", "answer_start_idx": 0}]),
        );
        answer.documents.push(Document::new("", Metadata::new()).with_id("d1"));

        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        assert_eq!(answer.text, "Answer.\n\n[[Ext 1]]()");
    }

    #[test]
    fn start_idx_counts_characters_not_bytes() {
        // "é" is two bytes; offset 1 must land right on the marker.
        let mut answer = answer_with_references(
            "é{Row 7} cited",
            json!([{"document_id": "d1", "answer_start_idx": 1}]),
        );
        let mut source = document("d1", "Book", "http://x/spreadsheets/d/X");
        source.meta.insert("sheet_name".to_owned(), json!("S"));
        answer.documents.push(source);

        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        assert!(answer.text.contains("!7:7"));
        assert!(answer.text.contains("&range=7:7"));
    }

    #[test]
    fn start_idx_past_end_of_text_finds_no_marker() {
        let mut answer = answer_with_references(
            "short {Row 9}",
            json!([{"document_id": "d1", "answer_start_idx": 999}]),
        );
        let mut source = document("d1", "Book", "http://x/spreadsheets/d/X");
        source.meta.insert("sheet_name".to_owned(), json!("S"));
        answer.documents.push(source);

        LinkResolver::new().run(std::slice::from_mut(&mut answer));
        assert!(!answer.text.contains("range="));
    }
}
