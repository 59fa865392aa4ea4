use indexmap::IndexMap;
use serde_json::Value;

/// Ordered string-keyed metadata attached to documents, sources and answers.
pub type Metadata = IndexMap<String, Value>;

/// A unit of indexable text plus its metadata.
///
/// The `id` is assigned by the ingesting side; extraction leaves it empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub meta: Metadata,
}

impl Document {
    pub fn new(content: impl Into<String>, meta: Metadata) -> Self {
        Self {
            id: String::new(),
            content: content.into(),
            meta,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Returns the string value of a metadata field, or the empty string if
    /// the field is absent or not a string.
    pub(crate) fn meta_str(&self, key: &str) -> String {
        self.meta
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    }
}
