//! `query` subcommand.

use anyhow::Context;
use clap::Args;
use tpuf_vector::{DistanceMetric, Filters, QueryOptions, TurbopufferStore};

use super::{parse_filters, print_json};
use crate::TRACING_TARGET_COMMAND;

/// Arguments for `query`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Query vector as comma-separated numbers
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    pub vector: Vec<f32>,

    /// Number of results
    #[arg(short, long, default_value = "10")]
    pub k: usize,

    /// Distance metric (cosine_distance or euclidean_squared)
    #[arg(long, default_value = "cosine_distance")]
    pub metric: DistanceMetric,

    /// Filter expression as JSON
    #[arg(long, value_parser = parse_filters)]
    pub filter: Option<Filters>,

    /// Attributes to return, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub include_attributes: Option<Vec<String>>,

    /// Return stored vectors
    #[arg(long)]
    pub include_vector: bool,
}

impl QueryArgs {
    pub async fn execute(self, store: &TurbopufferStore) -> anyhow::Result<()> {
        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            namespace = %store.namespace(),
            k = self.k,
            metric = %self.metric,
            "Querying vectors"
        );

        let mut options = QueryOptions::default().with_filters_opt(self.filter);
        options.include_attributes = self.include_attributes;
        if self.include_vector {
            options = options.with_vector(true);
        }

        let results = store
            .query_vectors(&self.vector, self.k, self.metric, options)
            .await
            .context("query failed")?;

        print_json(&results)
    }
}
