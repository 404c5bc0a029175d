//! Query request and response types.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use tpuf_core::emb::Embedding;
use tpuf_core::{Document, Metadata, MetadataValue};

use super::upsert::{PAGE_CONTENT_ATTRIBUTE, SOURCE_ATTRIBUTE};
use super::{DistanceMetric, Filters};

/// Optional parts of a vector query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Attribute names to return with each result.
    pub include_attributes: Option<Vec<String>>,
    /// Whether to return each result's stored vector.
    pub include_vector: Option<bool>,
    /// Filter expression forwarded to the service.
    pub filters: Option<Filters>,
}

impl QueryOptions {
    /// Requests the given attributes.
    #[must_use]
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets whether stored vectors are returned.
    #[must_use]
    pub fn with_vector(mut self, include_vector: bool) -> Self {
        self.include_vector = Some(include_vector);
        self
    }

    /// Sets the filter expression.
    #[must_use]
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Sets the filter expression when one is given.
    #[must_use]
    pub fn with_filters_opt(mut self, filters: Option<Filters>) -> Self {
        self.filters = filters;
        self
    }
}

/// Body of `POST /vectors/{namespace}/query`.
///
/// Unset optional fields are left out of the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: Embedding,
    pub k: usize,
    pub distance_metric: DistanceMetric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_vector: Option<bool>,
}

impl QueryRequest {
    /// Creates a request with no optional fields set.
    pub fn new(query: Embedding, k: usize, distance_metric: DistanceMetric) -> Self {
        Self {
            query,
            k,
            distance_metric,
            filters: None,
            include_attributes: None,
            include_vector: None,
        }
    }

    /// Applies query options.
    #[must_use]
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.filters = options.filters;
        self.include_attributes = options.include_attributes;
        self.include_vector = options.include_vector;
        self
    }
}

/// Query response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<QueryResult>,
}

/// A single nearest-neighbour hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Record id.
    pub id: u64,
    /// Distance to the query; smaller is closer.
    #[serde(rename = "dist")]
    pub distance: f64,
    /// Stored vector, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Embedding>,
    /// Returned attributes, keyed by name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: HashMap<String, MetadataValue>,
}

impl QueryResult {
    /// Returns a single attribute.
    pub fn attribute(&self, name: &str) -> Option<&MetadataValue> {
        self.attributes.get(name)
    }

    /// Rebuilds the stored document.
    ///
    /// A missing or non-string `pageContent` becomes empty text. Only
    /// `source` is carried into the metadata, and only when returned.
    pub fn to_document(&self) -> Document {
        let page_content = self
            .attribute(PAGE_CONTENT_ATTRIBUTE)
            .and_then(MetadataValue::as_str)
            .unwrap_or_default();

        let mut metadata = Metadata::new();
        if let Some(source) = self.attribute(SOURCE_ATTRIBUTE) {
            metadata.insert(SOURCE_ATTRIBUTE.to_owned(), source.clone());
        }

        Document::from_parts(page_content, metadata)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_minimal_request_omits_optionals() {
        let request = QueryRequest::new(vec![0.1, 0.2], 5, DistanceMetric::EuclideanSquared);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": [0.1f32, 0.2f32], "k": 5, "distanceMetric": "euclidean_squared" })
        );
    }

    #[test]
    fn test_full_request() {
        let options = QueryOptions::default()
            .with_attributes(["source"])
            .with_vector(true)
            .with_filters(Filters::new(json!(["source", "Eq", "a.md"])));
        let request =
            QueryRequest::new(vec![1.0], 2, DistanceMetric::CosineDistance).with_options(options);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": [1.0],
                "k": 2,
                "distanceMetric": "cosine_distance",
                "filters": ["source", "Eq", "a.md"],
                "includeAttributes": ["source"],
                "includeVector": true
            })
        );
    }

    #[test]
    fn test_decode_response() {
        let response: QueryResponse = serde_json::from_value(json!({
            "results": [
                { "id": 3, "dist": 0.25, "vector": null, "attributes": { "source": "a.md", "pageContent": "hi" } },
                { "id": 9, "dist": 0.5, "attributes": null },
                { "id": 1, "dist": 0.75 }
            ]
        }))
        .unwrap();

        assert_eq!(response.results.len(), 3);
        assert_eq!(response.results[0].id, 3);
        assert_eq!(response.results[0].distance, 0.25);
        assert_eq!(response.results[0].vector, None);
        assert!(response.results[1].attributes.is_empty());
        assert!(response.results[2].attributes.is_empty());
    }

    #[test]
    fn test_distance_keeps_full_precision() {
        let response: QueryResponse = serde_json::from_value(json!({
            "results": [
                { "id": 1, "dist": 0.1 },
                { "id": 2, "dist": 0.30000001 },
                { "id": 3, "dist": 0.30000002 }
            ]
        }))
        .unwrap();

        assert_eq!(response.results[0].distance, 0.1);
        assert_eq!(response.results[1].distance, 0.30000001);
        assert!(response.results[1].distance < response.results[2].distance);
    }

    #[test]
    fn test_to_document() {
        let result: QueryResult = serde_json::from_value(json!({
            "id": 3,
            "dist": 0.1,
            "attributes": { "source": "a.md", "pageContent": "hello", "page": 4 }
        }))
        .unwrap();
        let doc = result.to_document();

        assert_eq!(doc.page_content(), "hello");
        assert_eq!(doc.source_str(), Some("a.md"));
        assert_eq!(doc.metadata().len(), 1);
    }

    #[test]
    fn test_to_document_missing_attributes() {
        let result: QueryResult =
            serde_json::from_value(json!({ "id": 3, "dist": 0.1 })).unwrap();
        let doc = result.to_document();

        assert_eq!(doc.page_content(), "");
        assert!(doc.source().is_none());
        assert!(doc.metadata().is_empty());
    }
}
