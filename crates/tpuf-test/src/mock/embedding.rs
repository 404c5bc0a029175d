//! Mock embedding provider for testing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tpuf_core::emb::{Embedding, EmbeddingProvider};
use tpuf_core::{Error, Result};

/// Configuration for the mock embedding provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct MockEmbeddingConfig {
    /// Length of every produced vector
    #[cfg_attr(
        feature = "config",
        arg(long = "mock-embedding-dimensions", default_value = "8")
    )]
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Fail every call with an external error
    #[cfg_attr(feature = "config", arg(long = "mock-embedding-fail"))]
    #[serde(default)]
    pub fail: bool,
}

fn default_dimensions() -> usize {
    8
}

impl Default for MockEmbeddingConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            fail: false,
        }
    }
}

impl MockEmbeddingConfig {
    /// Set the vector length.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Make every call fail.
    #[must_use]
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[derive(Debug, Default)]
struct CallLog {
    calls: usize,
    last_texts: Vec<String>,
}

/// Mock embedding provider for testing.
///
/// The same text always maps to the same vector. Clones share one call log.
#[derive(Clone, Default, Debug)]
pub struct MockEmbeddingProvider {
    config: MockEmbeddingConfig,
    log: Arc<Mutex<CallLog>>,
}

impl MockEmbeddingProvider {
    /// Creates a new mock embedding provider with the given configuration.
    pub fn new(config: MockEmbeddingConfig) -> Self {
        Self {
            config,
            log: Arc::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &MockEmbeddingConfig {
        &self.config
    }

    /// Number of `embed_documents` calls so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.log().calls
    }

    /// Texts passed to the most recent call.
    pub fn last_texts(&self) -> Vec<String> {
        self.log().last_texts.clone()
    }

    /// Returns the vector produced for `text`.
    pub fn vector_for(&self, text: &str) -> Embedding {
        let mut state = fnv1a(text.as_bytes());
        (0..self.config.dimensions)
            .map(|_| {
                state = xorshift(state);
                (state % 10_000) as f32 / 10_000.0
            })
            .collect()
    }

    fn log(&self) -> MutexGuard<'_, CallLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        {
            let mut log = self.log();
            log.calls += 1;
            log.last_texts = texts.to_vec();
        }

        if self.config.fail {
            return Err(Error::external_error().with_message("mock embedding failure"));
        }

        Ok(texts.iter().map(|text| self.vector_for(text)).collect())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

fn xorshift(mut x: u64) -> u64 {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x
}
