//! Numeric synthetic data generators.

mod generation;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use strata_core::{DataSource, DataSourceError};

use crate::source::SyntheticError;
use generation::{
    build_blob_centroids, resolve_axis_scales, standard_normal_sample, validate_blob_config,
};

/// Uniform random vector configuration.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Axis scaling strategy for Gaussian blob generation.
#[derive(Clone, Debug)]
pub enum Anisotropy {
    /// One standard deviation for every axis.
    Isotropic(f32),
    /// Per-axis standard deviations.
    AxisScales(Vec<f32>),
}

/// Configuration for Gaussian blob synthetic data.
#[derive(Clone, Debug)]
pub struct GaussianBlobConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// Number of Gaussian blobs.
    pub cluster_count: usize,
    /// Radius of the circle the blob centroids sit on.
    pub separation: f32,
    /// Covariance anisotropy control.
    pub anisotropy: Anisotropy,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl GaussianBlobConfig {
    /// Well-separated isotropic blobs, the corpus the benches cluster.
    #[must_use]
    pub const fn separated(point_count: usize, dimensions: usize, seed: u64) -> Self {
        Self {
            point_count,
            dimensions,
            cluster_count: 8,
            separation: 40.0,
            anisotropy: Anisotropy::Isotropic(1.0),
            seed,
        }
    }
}

/// A [`DataSource`] over pre-generated, row-major `f32` vectors.
///
/// # Examples
/// ```
/// use strata_benches::source::{SyntheticConfig, SyntheticSource};
/// use strata_core::DataSource;
///
/// let config = SyntheticConfig { point_count: 10, dimensions: 4, seed: 42 };
/// let source = SyntheticSource::generate(&config)?;
/// assert_eq!(source.len(), 10);
/// assert_eq!(source.vector(3)?.len(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticSource {
    data: Vec<f32>,
    point_count: usize,
    dimensions: usize,
    name: &'static str,
}

impl SyntheticSource {
    /// Generates uniform random vectors in `[0.0, 1.0)`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        validate_shape(config.point_count, config.dimensions)?;
        let total = checked_total(config.point_count, config.dimensions)?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let data: Vec<f32> = (0..total)
            .map(|_| rng.gen_range(0.0_f32..1.0_f32))
            .collect();

        Self::from_parts(
            "synthetic-uniform",
            data,
            config.point_count,
            config.dimensions,
        )
    }

    /// Generates Gaussian blobs.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate_gaussian_blobs(config: &GaussianBlobConfig) -> Result<Self, SyntheticError> {
        Self::generate_gaussian_blobs_with_labels(config).map(|(source, _labels)| source)
    }

    /// Generates Gaussian blobs together with each point's blob index.
    ///
    /// Points are dealt to blobs round-robin, so point `i` belongs to blob
    /// `i % cluster_count`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    #[expect(
        clippy::float_arithmetic,
        reason = "Gaussian sampling offsets each centroid coordinate"
    )]
    pub fn generate_gaussian_blobs_with_labels(
        config: &GaussianBlobConfig,
    ) -> Result<(Self, Vec<usize>), SyntheticError> {
        validate_shape(config.point_count, config.dimensions)?;
        validate_blob_config(config)?;

        let scales = resolve_axis_scales(&config.anisotropy, config.dimensions)?;
        let centroids = build_blob_centroids(config, &mut SmallRng::seed_from_u64(config.seed));
        let mut rng = SmallRng::seed_from_u64(config.seed ^ 0xA5A5_A5A5_A5A5_A5A5_u64);
        let mut data = Vec::with_capacity(checked_total(config.point_count, config.dimensions)?);
        let mut labels = Vec::with_capacity(config.point_count);

        let dealt = centroids.iter().enumerate().cycle().take(config.point_count);
        for (label, centroid) in dealt {
            labels.push(label);
            for (centre, scale) in centroid.iter().zip(&scales) {
                data.push(*centre + standard_normal_sample(&mut rng)? * *scale);
            }
        }

        let source = Self::from_parts(
            "synthetic-gaussian-blobs",
            data,
            config.point_count,
            config.dimensions,
        )?;
        Ok((source, labels))
    }

    /// Returns the dimensionality of each vector.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dimensions(&self) -> usize { self.dimensions }

    /// Copies the vectors out as rows, for building indices.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<f32>> {
        self.data
            .chunks_exact(self.dimensions)
            .map(<[f32]>::to_vec)
            .collect()
    }

    fn from_parts(
        name: &'static str,
        data: Vec<f32>,
        point_count: usize,
        dimensions: usize,
    ) -> Result<Self, SyntheticError> {
        if data.len() != checked_total(point_count, dimensions)? {
            return Err(SyntheticError::InvalidFloatParameter {
                parameter: "data.len()",
            });
        }
        Ok(Self {
            data,
            point_count,
            dimensions,
            name,
        })
    }
}

impl DataSource for SyntheticSource {
    #[rustfmt::skip]
    fn len(&self) -> usize { self.point_count }

    #[rustfmt::skip]
    fn name(&self) -> &str { self.name }

    fn vector(&self, index: usize) -> Result<&[f32], DataSourceError> {
        if index >= self.point_count {
            return Err(DataSourceError::OutOfBounds { index });
        }
        let start = index
            .checked_mul(self.dimensions)
            .ok_or(DataSourceError::OutOfBounds { index })?;
        let end = start
            .checked_add(self.dimensions)
            .ok_or(DataSourceError::OutOfBounds { index })?;
        self.data
            .get(start..end)
            .ok_or(DataSourceError::OutOfBounds { index })
    }

    fn dimension(&self) -> Result<Option<usize>, DataSourceError> {
        Ok(Some(self.dimensions))
    }
}

const fn validate_shape(point_count: usize, dimensions: usize) -> Result<(), SyntheticError> {
    if point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    if dimensions == 0 {
        return Err(SyntheticError::ZeroDimensions);
    }
    Ok(())
}

fn checked_total(point_count: usize, dimensions: usize) -> Result<usize, SyntheticError> {
    point_count
        .checked_mul(dimensions)
        .ok_or(SyntheticError::Overflow)
}
