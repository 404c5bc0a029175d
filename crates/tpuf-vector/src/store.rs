//! Document store backed by a turbopuffer namespace.

use tpuf_core::Document;
use tpuf_core::emb::{Embedding, EmbeddingProvider, EmbeddingService};

use crate::TRACING_TARGET_STORE;
use crate::client::{ApiKey, TurbopufferClient, TurbopufferConfig};
use crate::error::Result;
use crate::types::{
    AddOptions, DistanceMetric, Filters, QueryOptions, QueryRequest, QueryResult, UpsertRequest,
};
use crate::types::{PAGE_CONTENT_ATTRIBUTE, SOURCE_ATTRIBUTE};

/// Identifier reported by [`TurbopufferStore::vectorstore_type`].
const VECTORSTORE_TYPE: &str = "turbopuffer";

/// Document store that embeds text locally and delegates storage and
/// nearest-neighbour search to turbopuffer.
///
/// The store keeps no state between calls besides its client and embedding
/// service; every operation is a single request.
#[derive(Clone)]
pub struct TurbopufferStore {
    client: TurbopufferClient,
    embeddings: EmbeddingService,
}

impl TurbopufferStore {
    /// Creates a store for the configured namespace.
    ///
    /// Resolves the API key from the config or the `TURBOPUFFER_API_KEY`
    /// environment variable. No request is made.
    pub fn new(embeddings: EmbeddingService, config: &TurbopufferConfig) -> Result<Self> {
        Self::with_api_key_resolver(embeddings, config, ApiKey::from_env)
    }

    /// Creates a store, using `fallback` for the API key when the config
    /// has none.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingCredential`] when neither the config
    /// nor `fallback` yields a key.
    pub fn with_api_key_resolver<F>(
        embeddings: EmbeddingService,
        config: &TurbopufferConfig,
        fallback: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> Option<ApiKey>,
    {
        let api_key = config.resolve_api_key_with(fallback)?;
        let client = TurbopufferClient::with_api_key(config, api_key)?;
        Ok(Self::from_client(client, embeddings))
    }

    /// Creates a store over an existing client.
    pub fn from_client(client: TurbopufferClient, embeddings: EmbeddingService) -> Self {
        tracing::info!(
            target: TRACING_TARGET_STORE,
            namespace = %client.namespace(),
            provider = embeddings.provider_name(),
            "Turbopuffer store ready"
        );

        Self { client, embeddings }
    }

    /// Creates a store and uploads `documents` into it.
    ///
    /// No store is returned when embedding or uploading fails.
    pub async fn from_documents(
        documents: &[Document],
        embeddings: EmbeddingService,
        config: &TurbopufferConfig,
    ) -> Result<Self> {
        let store = Self::new(embeddings, config)?;
        store.add_documents(documents, AddOptions::default()).await?;
        Ok(store)
    }

    /// Returns the store type identifier.
    pub fn vectorstore_type(&self) -> &'static str {
        VECTORSTORE_TYPE
    }

    /// Returns the namespace this store reads and writes.
    pub fn namespace(&self) -> &str {
        self.client.namespace()
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &TurbopufferClient {
        &self.client
    }

    /// Returns the embedding service.
    pub fn embeddings(&self) -> &EmbeddingService {
        &self.embeddings
    }

    /// Uploads precomputed vectors with the documents they represent.
    ///
    /// Without explicit ids, records are numbered `0..n` by batch position
    /// and overwrite any records already stored under those ids.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] before any request when the ids,
    /// documents and vectors do not line up or the batch is empty.
    pub async fn add_vectors(
        &self,
        vectors: Vec<Embedding>,
        documents: &[Document],
        options: AddOptions,
    ) -> Result<()> {
        let request = UpsertRequest::from_documents(vectors, documents, options)
            .inspect_err(|error| {
                tracing::warn!(
                    target: TRACING_TARGET_STORE,
                    namespace = %self.namespace(),
                    error = %error,
                    "Rejected upload batch"
                );
            })?;

        self.client.upsert(&request).await
    }

    /// Embeds `documents` in a single provider call and uploads them.
    ///
    /// An embedding failure is returned unchanged and nothing is uploaded.
    pub async fn add_documents(&self, documents: &[Document], options: AddOptions) -> Result<()> {
        let texts: Vec<String> = documents
            .iter()
            .map(|doc| doc.page_content().to_owned())
            .collect();

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            namespace = %self.namespace(),
            count = texts.len(),
            "Adding documents"
        );

        let vectors = self.embeddings.embed_documents(&texts).await?;
        self.add_vectors(vectors, documents, options).await
    }

    /// Runs a raw nearest-neighbour query.
    pub async fn query_vectors(
        &self,
        query: &[f32],
        k: usize,
        distance_metric: DistanceMetric,
        options: QueryOptions,
    ) -> Result<Vec<QueryResult>> {
        let request =
            QueryRequest::new(query.to_vec(), k, distance_metric).with_options(options);
        self.client.query(&request).await
    }

    /// Finds the `k` nearest documents to a query vector by cosine
    /// distance.
    ///
    /// Results keep the service's order and carry only `source` metadata.
    pub async fn similarity_search_vector_with_score(
        &self,
        query: &[f32],
        k: usize,
        filter: Option<Filters>,
    ) -> Result<Vec<(Document, f64)>> {
        let options = QueryOptions::default()
            .with_attributes([SOURCE_ATTRIBUTE, PAGE_CONTENT_ATTRIBUTE])
            .with_vector(false)
            .with_filters_opt(filter);

        let results = self
            .query_vectors(query, k, DistanceMetric::CosineDistance, options)
            .await?;

        Ok(results
            .iter()
            .map(|result| (result.to_document(), result.distance))
            .collect())
    }

    /// Embeds `query` and finds the `k` nearest documents with their
    /// distances.
    pub async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
        filter: Option<Filters>,
    ) -> Result<Vec<(Document, f64)>> {
        let vector = self.embeddings.embed_query(query).await?;
        self.similarity_search_vector_with_score(&vector, k, filter)
            .await
    }

    /// Embeds `query` and finds the `k` nearest documents.
    pub async fn similarity_search(
        &self,
        query: &str,
        k: usize,
        filter: Option<Filters>,
    ) -> Result<Vec<Document>> {
        let results = self.similarity_search_with_score(query, k, filter).await?;
        Ok(results.into_iter().map(|(doc, _)| doc).collect())
    }
}

impl std::fmt::Debug for TurbopufferStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurbopufferStore")
            .field("namespace", &self.namespace())
            .field("embeddings", &self.embeddings)
            .finish_non_exhaustive()
    }
}
