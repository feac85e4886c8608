//! Distance primitives for built-in numeric metrics.
//!
//! Scalar implementations of Euclidean, squared Euclidean, cosine and angular
//! distances. These routines validate their inputs and surface detailed
//! errors so callers can react appropriately during ingestion or clustering.
//! Accumulation happens in `f64` regardless of the `f32` storage type.

mod cosine;
mod euclidean;
mod helpers;
mod metric;
mod types;

pub use self::cosine::{angular_distance, cosine_distance};
pub use self::euclidean::{euclidean_distance, squared_euclidean_distance};
pub use self::metric::{DistanceMetric, Metric, UnknownMetric};
pub use self::types::{DistanceError, DistanceErrorCode, Result, Vector, VectorKind};

#[cfg(test)]
mod tests;
