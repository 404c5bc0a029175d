//! `search` subcommand.

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tpuf_core::Document;
use tpuf_vector::{Filters, TurbopufferStore};

use super::{parse_filters, print_json};
use crate::TRACING_TARGET_COMMAND;

/// Arguments for `search`.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query vector as comma-separated numbers
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub vector: Vec<f32>,

    /// Number of results
    #[arg(short, long, default_value = "4")]
    pub k: usize,

    /// Filter expression as JSON
    #[arg(long, value_parser = parse_filters)]
    pub filter: Option<Filters>,
}

#[derive(Debug, Serialize)]
struct SearchHit {
    document: Document,
    distance: f64,
}

impl SearchArgs {
    pub async fn execute(self, store: &TurbopufferStore) -> anyhow::Result<()> {
        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            namespace = %store.namespace(),
            k = self.k,
            filtered = self.filter.is_some(),
            "Searching documents"
        );

        let hits: Vec<SearchHit> = store
            .similarity_search_vector_with_score(&self.vector, self.k, self.filter)
            .await
            .context("search failed")?
            .into_iter()
            .map(|(document, distance)| SearchHit { document, distance })
            .collect();

        print_json(&hits)
    }
}
