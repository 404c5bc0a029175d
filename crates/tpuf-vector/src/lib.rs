#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for HTTP client operations.
pub const TRACING_TARGET_CLIENT: &str = "tpuf_vector::client";

/// Tracing target for store operations.
pub const TRACING_TARGET_STORE: &str = "tpuf_vector::store";

mod client;
mod error;
#[doc(hidden)]
pub mod prelude;
mod store;
pub mod types;

pub use crate::client::{ApiKey, TurbopufferClient, TurbopufferConfig};
pub use crate::error::{Error, Result};
pub use crate::store::TurbopufferStore;
pub use crate::types::{
    AddOptions, DistanceMetric, Filters, QueryOptions, QueryRequest, QueryResponse, QueryResult,
    UpsertRequest,
};
