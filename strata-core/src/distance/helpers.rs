//! Shared helpers for distance implementations.

use super::types::{DistanceError, Result, Vector, VectorKind};

/// Validates both slices and ensures they share the same dimensionality.
pub(crate) fn validated_pair<'a>(
    left: &'a [f32],
    right: &'a [f32],
) -> Result<(Vector<'a>, Vector<'a>)> {
    let left = Vector::new(left, VectorKind::Left)?;
    let right = Vector::new(right, VectorKind::Right)?;
    if left.dimension() != right.dimension() {
        return Err(DistanceError::DimensionMismatch {
            left: left.dimension(),
            right: right.dimension(),
        });
    }
    Ok((left, right))
}

/// Accumulates the dot product and squared magnitudes across both vectors.
pub(crate) fn accumulate_components(left: &Vector<'_>, right: &Vector<'_>) -> (f64, f64, f64) {
    let mut dot = 0.0f64;
    let mut left_squares = 0.0f64;
    let mut right_squares = 0.0f64;

    for (&l, &r) in left.iter().zip(right.iter()) {
        dot += f64::from(l) * f64::from(r);
        left_squares += f64::from(l) * f64::from(l);
        right_squares += f64::from(r) * f64::from(r);
    }

    (dot, left_squares, right_squares)
}

/// Computes the cosine similarity, clamped to `[-1, 1]`.
pub(crate) fn cosine_similarity(left: &Vector<'_>, right: &Vector<'_>) -> Result<f64> {
    let (dot, left_squares, right_squares) = accumulate_components(left, right);
    if left_squares == 0.0 {
        return Err(DistanceError::ZeroMagnitude {
            which: VectorKind::Left,
        });
    }
    if right_squares == 0.0 {
        return Err(DistanceError::ZeroMagnitude {
            which: VectorKind::Right,
        });
    }
    let similarity = dot / (left_squares.sqrt() * right_squares.sqrt());
    // Theoretical range is [-1, 1], but numerical noise can spill over.
    Ok(similarity.clamp(-1.0, 1.0))
}
