use crate::distance::helpers::validated_pair;
use crate::distance::types::Result;

/// Computes the Euclidean distance between two vectors.
///
/// # Examples
///
/// ```
/// use strata_core::distance::{DistanceError, euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0])?;
///     assert!((distance - 7.071_068).abs() < 1e-6);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`DistanceError::ZeroLength`](crate::DistanceError::ZeroLength) when any input is empty.
/// - [`DistanceError::DimensionMismatch`](crate::DistanceError::DimensionMismatch) when input lengths differ.
/// - [`DistanceError::NonFinite`](crate::DistanceError::NonFinite) when a value is NaN or infinite.
pub fn euclidean_distance(left: &[f32], right: &[f32]) -> Result<f64> {
    squared_euclidean_distance(left, right).map(f64::sqrt)
}

/// Computes the squared Euclidean distance between two vectors.
///
/// Cheaper than [`euclidean_distance`] and order-preserving, but it does not
/// satisfy the triangle inequality.
///
/// # Examples
///
/// ```
/// use strata_core::distance::{DistanceError, squared_euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = squared_euclidean_distance(&[0.0, 0.0], &[3.0, 4.0])?;
///     assert_eq!(distance, 25.0);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Same as [`euclidean_distance`].
pub fn squared_euclidean_distance(left: &[f32], right: &[f32]) -> Result<f64> {
    let (left, right) = validated_pair(left, right)?;

    let mut sum = 0.0f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        let diff = f64::from(l) - f64::from(r);
        sum += diff * diff;
    }

    Ok(sum)
}
