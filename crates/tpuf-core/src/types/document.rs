//! Document type stored in and returned from vector stores.

use serde::{Deserialize, Serialize};

use super::{Metadata, MetadataValue};

/// A piece of text plus the metadata describing where it came from.
///
/// Documents built with [`Document::new`] carry a `source` entry. Documents
/// are immutable once built: the `with_*` methods consume and return the
/// document.
///
/// Serializes as `{"pageContent": "...", "metadata": {"source": ...}}`.
///
/// # Examples
///
/// ```rust
/// use tpuf_core::Document;
///
/// let doc = Document::new("Turbopuffer stores vectors.", "notes/tpuf.md")
///     .with_metadata("page", 3);
///
/// assert_eq!(doc.page_content(), "Turbopuffer stores vectors.");
/// assert_eq!(doc.source_str(), Some("notes/tpuf.md"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    page_content: String,
    #[serde(default)]
    metadata: Metadata,
}

impl Document {
    /// Metadata key holding the document origin.
    pub const SOURCE_KEY: &'static str = "source";

    /// Creates a document with its text and `source` metadata entry.
    pub fn new(page_content: impl Into<String>, source: impl Into<MetadataValue>) -> Self {
        let mut metadata = Metadata::new();
        metadata.insert(Self::SOURCE_KEY.to_owned(), source.into());

        Self {
            page_content: page_content.into(),
            metadata,
        }
    }

    /// Creates a document from text and a complete metadata map.
    pub fn from_parts(page_content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }

    /// Adds a metadata entry, replacing any previous value for `key`.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns the document text.
    pub fn page_content(&self) -> &str {
        &self.page_content
    }

    /// Returns all metadata entries.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns a single metadata entry.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    /// Returns the `source` entry.
    pub fn source(&self) -> Option<&MetadataValue> {
        self.get(Self::SOURCE_KEY)
    }

    /// Returns the `source` entry when it is a string.
    pub fn source_str(&self) -> Option<&str> {
        self.source().and_then(MetadataValue::as_str)
    }

    /// Splits the document into its text and metadata.
    pub fn into_parts(self) -> (String, Metadata) {
        (self.page_content, self.metadata)
    }
}
