//! Document and metadata types.

mod document;
mod metadata;

pub use document::Document;
pub use metadata::{Metadata, MetadataValue};
