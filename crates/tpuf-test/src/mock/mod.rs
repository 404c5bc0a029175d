//! Mock implementations of the providers defined in tpuf-core.
//!
//! These mocks are deterministic and keep a call log, which makes them
//! suitable for asserting what a store sent to its provider.

mod embedding;

pub use embedding::{MockEmbeddingConfig, MockEmbeddingProvider};
use tpuf_core::emb::EmbeddingService;

/// Creates a mock embedding service with the default configuration.
pub fn create_embedding_service() -> EmbeddingService {
    EmbeddingService::new(MockEmbeddingProvider::default())
}
