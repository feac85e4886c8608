//! Core distances and the mutual-reachability oracle.
//!
//! The core distance of a point is its distance to the `k`-th nearest
//! neighbour reported by the index, counting the point itself as it appears
//! in its own neighbour list. The mutual reachability distance between two
//! points is the largest of their two core distances and their raw metric
//! distance. It is symmetric and never smaller than the metric distance.

mod cache;

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::{
    datasource::DataSource,
    distance::{DistanceError, DistanceMetric},
    error::DataSourceError,
    index::{IndexError, NO_NEIGHBOUR, NearestNeighbourIndex},
};

pub use self::cache::DistanceCache;

/// Errors raised while answering mutual-reachability queries.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ReachabilityError {
    /// Reading a vector from the data source failed.
    #[error("reading point {point} failed: {error}")]
    DataSource {
        /// Point whose vector was requested.
        point: usize,
        #[source]
        /// Underlying data source error.
        error: DataSourceError,
    },
    /// The metric rejected a pair of vectors.
    #[error("distance between {left} and {right} failed: {error}")]
    Distance {
        /// First point.
        left: usize,
        /// Second point.
        right: usize,
        #[source]
        /// Underlying metric error.
        error: DistanceError,
    },
    /// The metric returned NaN or a negative value.
    #[error("metric returned invalid distance {value} between {left} and {right}")]
    InvalidDistance {
        /// First point.
        left: usize,
        /// Second point.
        right: usize,
        /// The rejected value.
        value: f64,
    },
    /// The nearest-neighbour index failed to answer.
    #[error("neighbour query for point {point} failed: {error}")]
    Index {
        /// Point being queried.
        point: usize,
        #[source]
        /// Underlying index error.
        error: IndexError,
    },
    /// The index returned an id outside the data source.
    #[error("index returned neighbour {neighbour} for point {point}, but only {point_count} points exist")]
    InvalidNeighbour {
        /// Point being queried.
        point: usize,
        /// The out-of-range id.
        neighbour: usize,
        /// Number of points in the data source.
        point_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ReachabilityError`] variants.
    enum ReachabilityErrorCode for ReachabilityError {
        /// Reading a vector failed.
        DataSource => DataSource { .. } => "REACHABILITY_DATA_SOURCE_FAILURE",
        /// The metric rejected a pair of vectors.
        Distance => Distance { .. } => "REACHABILITY_DISTANCE_FAILURE",
        /// The metric returned NaN or a negative value.
        InvalidDistance => InvalidDistance { .. } => "REACHABILITY_INVALID_DISTANCE",
        /// The index failed to answer.
        Index => Index { .. } => "REACHABILITY_INDEX_FAILURE",
        /// The index returned an out-of-range id.
        InvalidNeighbour => InvalidNeighbour { .. } => "REACHABILITY_INVALID_NEIGHBOUR",
    }
}

/// Answers core-distance and mutual-reachability queries for one clustering
/// run.
///
/// Holds borrowed views of the data source, metric and core-distance cache
/// plus an owned index handle, so each worker chunk can take its own clone.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use strata_core::{
///     DataSource, DataSourceError, DistanceCache, ExactIndex, Metric, MutualReachability,
/// };
///
/// struct Line(Vec<Vec<f32>>);
///
/// impl DataSource for Line {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "line" }
///     fn vector(&self, index: usize) -> Result<&[f32], DataSourceError> {
///         self.0.get(index).map(Vec::as_slice).ok_or(DataSourceError::OutOfBounds { index })
///     }
/// }
///
/// let source = Line(vec![vec![0.0], vec![1.0], vec![3.0]]);
/// let index = ExactIndex::from_source(&source, Metric::Euclidean)?;
/// let cache = DistanceCache::new();
/// let k = NonZeroUsize::new(2).expect("non-zero");
/// let oracle = MutualReachability::new(&source, index, &Metric::Euclidean, &cache, k);
///
/// // The second-nearest hit of point 2 (after itself) is point 1.
/// assert_eq!(oracle.core_distance(2)?, 2.0);
/// assert_eq!(oracle.mutual_reachability(0, 1)?, 1.0);
/// assert_eq!(oracle.mutual_reachability(1, 2)?, 2.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MutualReachability<'a, D: ?Sized, I, M: ?Sized> {
    source: &'a D,
    index: I,
    metric: &'a M,
    cache: &'a DistanceCache,
    min_neighbours: NonZeroUsize,
}

impl<D: ?Sized, I: Clone, M: ?Sized> Clone for MutualReachability<'_, D, I, M> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            index: self.index.clone(),
            metric: self.metric,
            cache: self.cache,
            min_neighbours: self.min_neighbours,
        }
    }
}

impl<'a, D, I, M> MutualReachability<'a, D, I, M>
where
    D: DataSource + ?Sized,
    I: NearestNeighbourIndex,
    M: DistanceMetric + ?Sized,
{
    /// Creates an oracle whose core distances use `min_neighbours` hits.
    pub fn new(
        source: &'a D,
        index: I,
        metric: &'a M,
        cache: &'a DistanceCache,
        min_neighbours: NonZeroUsize,
    ) -> Self {
        Self {
            source,
            index,
            metric,
            cache,
            min_neighbours,
        }
    }

    /// Number of points in the underlying data source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns whether the data source is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Neighbour count used for core distances.
    #[rustfmt::skip]
    #[must_use]
    pub fn min_neighbours(&self) -> NonZeroUsize { self.min_neighbours }

    /// Core-distance cache shared by every clone of this oracle.
    #[rustfmt::skip]
    #[must_use]
    pub fn cache(&self) -> &'a DistanceCache { self.cache }

    /// Returns up to `limit` neighbours of `point`, closest first, with
    /// sentinel slots removed.
    ///
    /// # Errors
    /// Returns [`ReachabilityError::InvalidNeighbour`] when the index reports
    /// an id outside the data source, and propagates data source and index
    /// failures.
    pub fn neighbours(&self, point: usize, limit: usize) -> Result<Vec<usize>, ReachabilityError> {
        let query = self.vector(point)?;
        let point_count = self.source.len();
        let hits = self
            .index
            .find(query, limit)
            .map_err(|error| ReachabilityError::Index { point, error })?;
        let mut neighbours = Vec::with_capacity(hits.len());
        for neighbour in hits {
            if neighbour == NO_NEIGHBOUR {
                continue;
            }
            if neighbour >= point_count {
                return Err(ReachabilityError::InvalidNeighbour {
                    point,
                    neighbour,
                    point_count,
                });
            }
            neighbours.push(neighbour);
        }
        Ok(neighbours)
    }

    /// Raw metric distance between two points.
    ///
    /// # Errors
    /// Returns [`ReachabilityError::InvalidDistance`] when the metric yields
    /// NaN or a negative value, and propagates data source and metric
    /// failures.
    pub fn distance(&self, left: usize, right: usize) -> Result<f64, ReachabilityError> {
        let value = self
            .metric
            .distance(self.vector(left)?, self.vector(right)?)
            .map_err(|error| ReachabilityError::Distance { left, right, error })?;
        if value.is_nan() || value < 0.0 {
            return Err(ReachabilityError::InvalidDistance { left, right, value });
        }
        Ok(value)
    }

    /// Distance from `point` to its `k`-th nearest neighbour, or `+inf` when
    /// the index reports fewer than `k` valid neighbours.
    ///
    /// # Errors
    /// Propagates failures from [`Self::neighbours`] and [`Self::distance`].
    pub fn core_distance(&self, point: usize) -> Result<f64, ReachabilityError> {
        if let Some(cached) = self.cache.get(point) {
            return Ok(cached);
        }
        let k = self.min_neighbours.get();
        let neighbours = self.neighbours(point, k)?;
        let value = match neighbours.get(k - 1) {
            Some(&farthest) => self.distance(point, farthest)?,
            None => f64::INFINITY,
        };
        Ok(self.cache.get_or_insert(point, value))
    }

    /// `max(core(left), core(right), distance(left, right))`.
    ///
    /// # Errors
    /// Propagates failures from [`Self::core_distance`] and
    /// [`Self::distance`].
    pub fn mutual_reachability(&self, left: usize, right: usize) -> Result<f64, ReachabilityError> {
        let core_left = self.core_distance(left)?;
        let core_right = self.core_distance(right)?;
        let raw = self.distance(left, right)?;
        Ok(raw.max(core_left).max(core_right))
    }

    fn vector(&self, point: usize) -> Result<&'a [f32], ReachabilityError> {
        let source: &'a D = self.source;
        source
            .vector(point)
            .map_err(|error| ReachabilityError::DataSource { point, error })
    }
}
