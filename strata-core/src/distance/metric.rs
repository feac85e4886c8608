//! Pluggable metric abstraction consumed by the index and the
//! mutual-reachability oracle.

use core::{fmt, str::FromStr};

use super::{
    angular_distance, cosine_distance, euclidean_distance, squared_euclidean_distance,
    types::Result,
};

/// A symmetric, non-negative dissimilarity between two vectors.
///
/// Implementations are shared across the Borůvka worker pool, so they must be
/// `Send + Sync`.
///
/// # Examples
/// ```
/// use strata_core::{DistanceMetric, Metric};
///
/// let metric = Metric::Euclidean;
/// let d = metric.distance(&[0.0, 0.0], &[3.0, 4.0])?;
/// assert_eq!(d, 5.0);
/// assert_eq!(metric.name(), "euclidean");
/// # Ok::<(), strata_core::DistanceError>(())
/// ```
pub trait DistanceMetric: Send + Sync {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Computes the distance between `left` and `right`.
    ///
    /// # Errors
    /// Returns a [`crate::DistanceError`] when the inputs cannot be compared.
    fn distance(&self, left: &[f32], right: &[f32]) -> Result<f64>;
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn distance(&self, left: &[f32], right: &[f32]) -> Result<f64> {
        (**self).distance(left, right)
    }
}

/// Built-in metrics.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Metric {
    /// L2 distance.
    #[default]
    Euclidean,
    /// Squared L2 distance.
    SquaredEuclidean,
    /// Cosine dissimilarity, `1 - cos(θ)`.
    Cosine,
    /// Angular distance, `acos(cos(θ)) / π`.
    Angular,
}

impl DistanceMetric for Metric {
    fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::SquaredEuclidean => "squared-euclidean",
            Self::Cosine => "cosine",
            Self::Angular => "angular",
        }
    }

    fn distance(&self, left: &[f32], right: &[f32]) -> Result<f64> {
        match self {
            Self::Euclidean => euclidean_distance(left, right),
            Self::SquaredEuclidean => squared_euclidean_distance(left, right),
            Self::Cosine => cosine_distance(left, right),
            Self::Angular => angular_distance(left, right),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown metric name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown metric `{0}`; expected euclidean, squared-euclidean, cosine or angular")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(raw: &str) -> core::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Self::Euclidean),
            "squared-euclidean" | "sqeuclidean" => Ok(Self::SquaredEuclidean),
            "cosine" => Ok(Self::Cosine),
            "angular" => Ok(Self::Angular),
            _ => Err(UnknownMetric(raw.to_owned())),
        }
    }
}
