//! Distance metrics understood by the service.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// How the service scores candidates against the query vector.
///
/// Smaller distances are closer for both metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DistanceMetric {
    /// One minus cosine similarity.
    #[default]
    CosineDistance,
    /// Squared Euclidean distance.
    EuclideanSquared,
}
