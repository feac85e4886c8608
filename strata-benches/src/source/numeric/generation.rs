//! Blob placement and sampling helpers.

use std::f32::consts::PI;

use rand::{Rng, rngs::SmallRng};

use super::{Anisotropy, GaussianBlobConfig};
use crate::source::SyntheticError;

pub(super) fn validate_blob_config(config: &GaussianBlobConfig) -> Result<(), SyntheticError> {
    if config.cluster_count == 0 {
        return Err(SyntheticError::ZeroClusters);
    }
    if config.cluster_count > config.point_count {
        return Err(SyntheticError::ClusterCountExceedsPointCount {
            cluster_count: config.cluster_count,
            point_count: config.point_count,
        });
    }
    if !config.separation.is_finite() || config.separation <= 0.0 {
        return Err(SyntheticError::InvalidFloatParameter {
            parameter: "separation",
        });
    }
    Ok(())
}

/// Spreads centroids evenly around a circle of radius `separation` in the
/// first two axes and jitters the remaining axes.
#[expect(
    clippy::cast_precision_loss,
    reason = "centroid angles are derived from small blob indices"
)]
#[expect(
    clippy::float_arithmetic,
    reason = "centroid placement uses trigonometric expressions"
)]
pub(super) fn build_blob_centroids(
    config: &GaussianBlobConfig,
    rng: &mut SmallRng,
) -> Vec<Vec<f32>> {
    let jitter = 0.2 * config.separation;
    (0..config.cluster_count)
        .map(|blob| {
            let angle = (blob as f32 / config.cluster_count as f32) * (2.0 * PI);
            let mut centroid = vec![0.0_f32; config.dimensions];
            if let Some(value) = centroid.get_mut(0) {
                *value = config.separation * angle.cos();
            }
            if let Some(value) = centroid.get_mut(1) {
                *value = config.separation * angle.sin();
            }
            for value in centroid.iter_mut().skip(2) {
                *value = rng.gen_range(-jitter..jitter);
            }
            centroid
        })
        .collect()
}

pub(super) fn resolve_axis_scales(
    anisotropy: &Anisotropy,
    dimensions: usize,
) -> Result<Vec<f32>, SyntheticError> {
    match anisotropy {
        Anisotropy::Isotropic(scale) => {
            if !scale.is_finite() || *scale <= 0.0 {
                return Err(SyntheticError::InvalidFloatParameter {
                    parameter: "anisotropy.scale",
                });
            }
            Ok(vec![*scale; dimensions])
        }
        Anisotropy::AxisScales(scales) => {
            if scales.len() != dimensions {
                return Err(SyntheticError::AxisScaleLengthMismatch {
                    expected: dimensions,
                    actual: scales.len(),
                });
            }
            if let Some(index) = scales
                .iter()
                .position(|value| !value.is_finite() || *value <= 0.0)
            {
                return Err(SyntheticError::InvalidAxisScale { index });
            }
            Ok(scales.clone())
        }
    }
}

/// Box-Muller sample from the standard normal distribution.
#[expect(
    clippy::float_arithmetic,
    reason = "Box-Muller transform requires floating-point arithmetic"
)]
pub(super) fn standard_normal_sample(rng: &mut SmallRng) -> Result<f32, SyntheticError> {
    let u1 = rng.gen_range(0.0_f32..1.0_f32).max(f32::EPSILON);
    let u2 = rng.gen_range(0.0_f32..1.0_f32);
    let sample = (-2.0_f32 * u1.ln()).sqrt() * (2.0_f32 * PI * u2).cos();
    if sample.is_finite() {
        Ok(sample)
    } else {
        Err(SyntheticError::InvalidFloatParameter {
            parameter: "standard_normal_sample",
        })
    }
}
