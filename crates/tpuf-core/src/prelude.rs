//! Convenient re-exports for common use.

pub use crate::emb::{BoxedEmbeddingProvider, Embedding, EmbeddingProvider, EmbeddingService};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::types::{Document, Metadata, MetadataValue};
