use std::f64::consts::PI;

use crate::distance::helpers::{cosine_similarity, validated_pair};
use crate::distance::types::Result;

/// Computes the cosine dissimilarity `1 - cos(θ)` between two vectors.
///
/// The result lies in `[0, 2]`.
///
/// # Examples
///
/// ```
/// use strata_core::distance::{DistanceError, cosine_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let orthogonal = cosine_distance(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0])?;
///     assert!((orthogonal - 1.0).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`DistanceError::ZeroLength`](crate::DistanceError::ZeroLength) when any input is empty.
/// - [`DistanceError::DimensionMismatch`](crate::DistanceError::DimensionMismatch) when input lengths differ.
/// - [`DistanceError::NonFinite`](crate::DistanceError::NonFinite) when a value is NaN or infinite.
/// - [`DistanceError::ZeroMagnitude`](crate::DistanceError::ZeroMagnitude) when either vector has zero L2 norm.
pub fn cosine_distance(left: &[f32], right: &[f32]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;
    let similarity = cosine_similarity(&left, &right)?;
    Ok(1.0 - similarity)
}

/// Computes the angular distance `acos(cos(θ)) / π` between two vectors.
///
/// Unlike [`cosine_distance`] this is a proper metric; the result lies in
/// `[0, 1]`.
///
/// # Examples
///
/// ```
/// use strata_core::distance::{DistanceError, angular_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let opposite = angular_distance(&[1.0, 0.0], &[-1.0, 0.0])?;
///     assert!((opposite - 1.0).abs() < 1e-12);
///     let orthogonal = angular_distance(&[1.0, 0.0], &[0.0, 2.0])?;
///     assert!((orthogonal - 0.5).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Same as [`cosine_distance`].
pub fn angular_distance(left: &[f32], right: &[f32]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;
    let similarity = cosine_similarity(&left, &right)?;
    Ok(similarity.acos() / PI)
}
