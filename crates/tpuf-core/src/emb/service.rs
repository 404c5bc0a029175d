//! Shared embedding service handle.

use std::sync::Arc;

use super::{Embedding, EmbeddingProvider, Result};
use crate::TRACING_TARGET_EMB;

/// Cheaply cloneable handle around an [`EmbeddingProvider`].
///
/// Vector stores hold this instead of a generic parameter so one provider
/// can back several stores.
///
/// # Example
///
/// ```rust,ignore
/// use tpuf_core::emb::EmbeddingService;
///
/// let service = EmbeddingService::new(my_provider);
/// let vectors = service.embed_documents(&texts).await?;
/// ```
#[derive(Clone)]
pub struct EmbeddingService {
    inner: Arc<dyn EmbeddingProvider>,
}

impl EmbeddingService {
    /// Wraps a provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: EmbeddingProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Wraps an already shared provider.
    pub fn from_arc(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for EmbeddingService {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        tracing::debug!(
            target: TRACING_TARGET_EMB,
            provider = self.inner.provider_name(),
            count = texts.len(),
            "Embedding documents"
        );

        let embeddings = self.inner.embed_documents(texts).await;

        if let Err(ref error) = embeddings {
            tracing::warn!(
                target: TRACING_TARGET_EMB,
                provider = self.inner.provider_name(),
                error = %error,
                "Embedding documents failed"
            );
        }

        embeddings
    }

    async fn embed_query(&self, text: &str) -> Result<Embedding> {
        tracing::debug!(
            target: TRACING_TARGET_EMB,
            provider = self.inner.provider_name(),
            "Embedding query"
        );
        self.inner.embed_query(text).await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

impl std::fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingService")
            .field("provider", &self.inner.provider_name())
            .finish()
    }
}
