//! Embedding provider abstractions.
//!
//! This module defines the trait vector stores use to turn text into vectors
//! without depending on any concrete embedding model.

mod service;

pub use service::EmbeddingService;

pub use crate::{Error, ErrorKind, Result};

/// A single embedding vector.
pub type Embedding = Vec<f32>;

/// Type alias for a boxed embedding provider.
pub type BoxedEmbeddingProvider = Box<dyn EmbeddingProvider + Send + Sync>;

/// Core trait for embedding providers.
///
/// Implementations must return exactly one vector per input text, in input
/// order. Vector length is expected to be uniform across a batch; callers
/// do not re-check it.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a batch of document texts in a single call.
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Embeds a single query text.
    ///
    /// The default implementation embeds a one-element batch.
    async fn embed_query(&self, text: &str) -> Result<Embedding> {
        let mut embeddings = self.embed_documents(&[text.to_owned()]).await?;
        embeddings.pop().ok_or_else(|| {
            Error::external_error().with_message("provider returned no embedding for query")
        })
    }

    /// Short provider name used in logs.
    fn provider_name(&self) -> &'static str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LengthEmbedder;

    #[async_trait::async_trait]
    impl EmbeddingProvider for LengthEmbedder {
        async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Embedding>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32]).collect())
        }
    }

    struct EmptyEmbedder;

    #[async_trait::async_trait]
    impl EmbeddingProvider for EmptyEmbedder {
        async fn embed_documents(&self, _texts: &[String]) -> Result<Vec<Embedding>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_default_embed_query() {
        let embedding = LengthEmbedder.embed_query("four").await.unwrap();
        assert_eq!(embedding, vec![4.0]);
        assert_eq!(LengthEmbedder.provider_name(), "unknown");
    }

    #[tokio::test]
    async fn test_embed_query_without_result() {
        let err = EmptyEmbedder.embed_query("x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExternalError);
    }
}
