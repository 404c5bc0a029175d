//! Upload batch construction.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tpuf_core::emb::Embedding;
use tpuf_core::{Document, MetadataValue};

use crate::error::{Error, Result};

/// Attribute holding the document origin.
pub(crate) const SOURCE_ATTRIBUTE: &str = "source";

/// Attribute holding the raw document text.
pub(crate) const PAGE_CONTENT_ATTRIBUTE: &str = "pageContent";

/// Attribute columns: one value per record, in record order.
pub type Attributes = BTreeMap<String, Vec<MetadataValue>>;

/// Options for adding records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Explicit record ids. When absent, records are numbered by position.
    pub ids: Option<Vec<u64>>,
}

impl AddOptions {
    /// Uses explicit record ids instead of batch positions.
    #[must_use]
    pub fn with_ids(mut self, ids: Vec<u64>) -> Self {
        self.ids = Some(ids);
        self
    }
}

/// Body of `POST /vectors/{namespace}`.
///
/// `doc_ids`, `vectors` and every attribute column have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertRequest {
    pub doc_ids: Vec<u64>,
    pub vectors: Vec<Embedding>,
    pub attributes: Attributes,
}

impl UpsertRequest {
    /// Creates a request from already aligned columns.
    pub fn new(doc_ids: Vec<u64>, vectors: Vec<Embedding>, attributes: Attributes) -> Self {
        Self {
            doc_ids,
            vectors,
            attributes,
        }
    }

    /// Builds a request from vectors and the documents they were embedded
    /// from.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when explicit ids or documents do not
    /// line up with the vectors, or when the batch is empty. Checks run in
    /// that order.
    pub fn from_documents(
        vectors: Vec<Embedding>,
        documents: &[Document],
        options: AddOptions,
    ) -> Result<Self> {
        if let Some(ids) = &options.ids
            && ids.len() != vectors.len()
        {
            return Err(Error::validation(
                "Number of ids provided does not match number of vectors",
            ));
        }

        if documents.len() != vectors.len() {
            return Err(Error::validation(
                "Number of documents provided does not match number of vectors",
            ));
        }

        if documents.is_empty() {
            return Err(Error::validation("No documents provided"));
        }

        let doc_ids = options
            .ids
            .unwrap_or_else(|| (0..documents.len() as u64).collect());

        Ok(Self::new(doc_ids, vectors, document_attributes(documents)))
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    /// Returns `true` if the request carries no records.
    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }
}

/// Lays document metadata out as attribute columns.
///
/// `source` and `pageContent` are always present. Every other metadata key
/// seen in the batch gets its own column, with `null` for documents that
/// lack it.
fn document_attributes(documents: &[Document]) -> Attributes {
    let column = |key: &str| -> Vec<MetadataValue> {
        documents
            .iter()
            .map(|doc| doc.get(key).cloned().unwrap_or_default())
            .collect()
    };

    let mut attributes = Attributes::new();
    attributes.insert(SOURCE_ATTRIBUTE.to_owned(), column(SOURCE_ATTRIBUTE));
    attributes.insert(
        PAGE_CONTENT_ATTRIBUTE.to_owned(),
        documents
            .iter()
            .map(|doc| MetadataValue::from(doc.page_content()))
            .collect(),
    );

    let extra_keys: BTreeSet<&str> = documents
        .iter()
        .flat_map(|doc| doc.metadata().keys())
        .map(String::as_str)
        .filter(|key| *key != SOURCE_ATTRIBUTE && *key != PAGE_CONTENT_ATTRIBUTE)
        .collect();

    for key in extra_keys {
        attributes.insert(key.to_owned(), column(key));
    }

    attributes
}
