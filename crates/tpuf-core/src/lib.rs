#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for embedding operations.
pub const TRACING_TARGET_EMB: &str = "tpuf_core::emb";

mod error;

pub mod emb;
#[doc(hidden)]
pub mod prelude;
pub mod types;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use types::{Document, Metadata, MetadataValue};
