//! Convenient re-exports for common use.

pub use tpuf_core::emb::{EmbeddingProvider, EmbeddingService};
pub use tpuf_core::{Document, MetadataValue};

pub use crate::client::{ApiKey, TurbopufferClient, TurbopufferConfig};
pub use crate::error::{Error, Result};
pub use crate::store::TurbopufferStore;
pub use crate::types::{AddOptions, DistanceMetric, Filters, QueryOptions, QueryResult};
