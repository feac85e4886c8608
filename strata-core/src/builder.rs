//! Builder utilities for configuring HDBSCAN runs.
//!
//! Exposes the spanning tree strategy selection surface and the validation
//! applied before constructing [`Hdbscan`] instances.

use std::{fmt, num::NonZeroUsize};

use crate::{
    Result,
    distance::DistanceMetric,
    error::ClusteringError,
    hdbscan::Hdbscan,
    index::NearestNeighbourIndex,
    mst::{MstConfig, default_workers},
};

/// Selects how [`Hdbscan`] builds its mutual-reachability spanning tree.
///
/// # Examples
/// ```
/// use strata_core::MstStrategy;
///
/// assert_eq!(MstStrategy::default(), MstStrategy::Boruvka);
/// assert_eq!(MstStrategy::Prim.to_string(), "prim");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MstStrategy {
    /// Parallel Borůvka rounds over a bounded worker pool.
    #[default]
    Boruvka,
    /// Sequential Prim growth from a seeded random start vertex.
    Prim,
}

impl fmt::Display for MstStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Boruvka => "boruvka",
            Self::Prim => "prim",
        })
    }
}

/// Configures and constructs [`Hdbscan`] instances.
///
/// # Examples
/// ```
/// use strata_core::{ExactIndex, HdbscanBuilder, Metric, MstStrategy};
///
/// let index = ExactIndex::new(vec![vec![0.0], vec![1.0]], Metric::Euclidean)?;
/// let hdbscan = HdbscanBuilder::new()
///     .with_min_cluster_size(8)
///     .with_min_neighbours(4)
///     .with_strategy(MstStrategy::Prim)
///     .build(index, Metric::Euclidean)?;
/// assert_eq!(hdbscan.min_cluster_size().get(), 8);
/// assert_eq!(hdbscan.min_neighbours().get(), 4);
/// assert_eq!(hdbscan.strategy(), MstStrategy::Prim);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct HdbscanBuilder {
    min_neighbours: usize,
    min_cluster_size: usize,
    strategy: MstStrategy,
    max_workers: Option<usize>,
    seed: u64,
    fallback_candidate_limit: usize,
}

impl Default for HdbscanBuilder {
    fn default() -> Self {
        Self {
            min_neighbours: 15,
            min_cluster_size: 25,
            strategy: MstStrategy::Boruvka,
            max_workers: None,
            seed: 0,
            fallback_candidate_limit: MstConfig::DEFAULT_FALLBACK_CANDIDATE_LIMIT.get(),
        }
    }
}

impl HdbscanBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use strata_core::{HdbscanBuilder, MstStrategy};
    ///
    /// let builder = HdbscanBuilder::new();
    /// assert_eq!(builder.min_neighbours(), 15);
    /// assert_eq!(builder.min_cluster_size(), 25);
    /// assert_eq!(builder.strategy(), MstStrategy::Boruvka);
    /// assert_eq!(builder.max_workers(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the neighbour count used for core distances.
    #[must_use]
    pub fn with_min_neighbours(mut self, count: usize) -> Self {
        self.min_neighbours = count;
        self
    }

    /// Returns the configured neighbour count.
    #[rustfmt::skip]
    #[must_use]
    pub fn min_neighbours(&self) -> usize { self.min_neighbours }

    /// Overrides the minimum cluster size.
    ///
    /// # Examples
    /// ```
    /// use strata_core::HdbscanBuilder;
    ///
    /// let builder = HdbscanBuilder::new().with_min_cluster_size(10);
    /// assert_eq!(builder.min_cluster_size(), 10);
    /// ```
    #[must_use]
    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }

    /// Returns the configured minimum cluster size.
    #[rustfmt::skip]
    #[must_use]
    pub fn min_cluster_size(&self) -> usize { self.min_cluster_size }

    /// Selects the spanning tree strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: MstStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured spanning tree strategy.
    #[rustfmt::skip]
    #[must_use]
    pub fn strategy(&self) -> MstStrategy { self.strategy }

    /// Caps the Borůvka worker pool. Unset means available parallelism minus
    /// two, at least one.
    #[must_use]
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Returns the explicit worker cap, if any.
    #[rustfmt::skip]
    #[must_use]
    pub fn max_workers(&self) -> Option<usize> { self.max_workers }

    /// Sets the seed used to pick Prim's starting vertex.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[rustfmt::skip]
    #[must_use]
    pub fn seed(&self) -> u64 { self.seed }

    /// Bounds the number of candidates examined when a spanning tree round
    /// finds no neighbour-backed edge.
    #[must_use]
    pub fn with_fallback_candidate_limit(mut self, limit: usize) -> Self {
        self.fallback_candidate_limit = limit;
        self
    }

    /// Returns the configured fallback candidate bound.
    #[rustfmt::skip]
    #[must_use]
    pub fn fallback_candidate_limit(&self) -> usize { self.fallback_candidate_limit }

    /// Validates the configuration and constructs an [`Hdbscan`] instance
    /// around `index` and `metric`.
    ///
    /// # Errors
    /// Returns the matching `Invalid*` [`ClusteringError`] when any count is
    /// zero.
    ///
    /// # Examples
    /// ```
    /// use strata_core::{ClusteringError, ExactIndex, HdbscanBuilder, Metric};
    ///
    /// let index = ExactIndex::new(vec![vec![0.0]], Metric::Euclidean)?;
    /// let err = HdbscanBuilder::new()
    ///     .with_max_workers(0)
    ///     .build(index, Metric::Euclidean)
    ///     .expect_err("zero workers are rejected");
    /// assert_eq!(err, ClusteringError::InvalidWorkerCount { got: 0 });
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn build<I, M>(self, index: I, metric: M) -> Result<Hdbscan<I, M>>
    where
        I: NearestNeighbourIndex,
        M: DistanceMetric,
    {
        let min_neighbours = NonZeroUsize::new(self.min_neighbours).ok_or(
            ClusteringError::InvalidMinNeighbours {
                got: self.min_neighbours,
            },
        )?;
        let min_cluster_size = NonZeroUsize::new(self.min_cluster_size).ok_or(
            ClusteringError::InvalidMinClusterSize {
                got: self.min_cluster_size,
            },
        )?;
        let workers = match self.max_workers {
            Some(got) => NonZeroUsize::new(got).ok_or(ClusteringError::InvalidWorkerCount { got })?,
            None => default_workers(),
        };
        let fallback_candidate_limit = NonZeroUsize::new(self.fallback_candidate_limit).ok_or(
            ClusteringError::InvalidFallbackLimit {
                got: self.fallback_candidate_limit,
            },
        )?;

        let mst = MstConfig::new(min_neighbours)
            .with_workers(workers)
            .with_fallback_candidate_limit(fallback_candidate_limit)
            .with_seed(self.seed);
        Ok(Hdbscan::new(
            min_cluster_size,
            self.strategy,
            mst,
            index,
            metric,
        ))
    }
}
