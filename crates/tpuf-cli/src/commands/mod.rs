//! CLI subcommands.

mod query;
mod search;
mod upload;

use clap::Subcommand;
use serde::Serialize;
use tpuf_core::emb::{Embedding, EmbeddingProvider, EmbeddingService};
use tpuf_core::{Error, Result};
use tpuf_vector::{Filters, TurbopufferStore};

pub use self::query::QueryArgs;
pub use self::search::SearchArgs;
pub use self::upload::UploadArgs;

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload precomputed vectors and their documents.
    Upload(UploadArgs),
    /// Run a raw vector query.
    Query(QueryArgs),
    /// Find the nearest documents to a vector by cosine distance.
    Search(SearchArgs),
}

impl Command {
    /// Returns the subcommand name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upload(_) => "upload",
            Self::Query(_) => "query",
            Self::Search(_) => "search",
        }
    }

    /// Runs the subcommand against `store`.
    pub async fn execute(self, store: &TurbopufferStore) -> anyhow::Result<()> {
        match self {
            Self::Upload(args) => args.execute(store).await,
            Self::Query(args) => args.execute(store).await,
            Self::Search(args) => args.execute(store).await,
        }
    }
}

/// Embedding provider for a CLI that only handles precomputed vectors.
///
/// Every call fails; commands never ask the store to embed text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecomputedEmbeddings;

impl PrecomputedEmbeddings {
    /// Returns the provider wrapped in a service.
    pub fn service() -> EmbeddingService {
        EmbeddingService::new(Self)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for PrecomputedEmbeddings {
    async fn embed_documents(&self, _texts: &[String]) -> Result<Vec<Embedding>> {
        Err(Error::invalid_input().with_message("only precomputed vectors are supported"))
    }

    fn provider_name(&self) -> &'static str {
        "precomputed"
    }
}

/// Parses a JSON filter expression.
fn parse_filters(value: &str) -> std::result::Result<Filters, serde_json::Error> {
    serde_json::from_str(value).map(Filters::new)
}

/// Writes `value` to stdout as pretty JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tpuf_core::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_precomputed_embeddings_refuse() {
        let service = PrecomputedEmbeddings::service();
        let err = service.embed_query("text").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(service.provider_name(), "precomputed");
    }

    #[test]
    fn test_parse_filters() {
        let filters = parse_filters(r#"["source", "Eq", "a.md"]"#).unwrap();
        assert_eq!(filters.as_value()[0], "source");
        assert!(parse_filters("not json").is_err());
    }
}
