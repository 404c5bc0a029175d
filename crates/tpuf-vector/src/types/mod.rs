//! Request and response types for the turbopuffer vector API.

mod distance;
mod filter;
mod query;
mod upsert;

pub use distance::DistanceMetric;
pub use filter::Filters;
pub use query::{QueryOptions, QueryRequest, QueryResponse, QueryResult};
pub use upsert::{AddOptions, Attributes, UpsertRequest};
pub(crate) use upsert::{PAGE_CONTENT_ATTRIBUTE, SOURCE_ATTRIBUTE};
