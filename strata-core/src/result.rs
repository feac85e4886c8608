//! Result types for clustering operations.
//!
//! A clustering partitions the point indices into flat clusters and
//! outliers. Points inside each cluster are sorted ascending and clusters are
//! ordered by their smallest point, so equal partitions compare equal.

use thiserror::Error;

/// Represents the output of [`crate::Hdbscan::cluster`].
///
/// # Examples
/// ```
/// use strata_core::{ClusterId, ClusteringResult};
///
/// let result = ClusteringResult::try_from_clusters(5, vec![vec![4, 3], vec![0, 1]])?;
/// assert_eq!(result.clusters(), &[vec![0, 1], vec![3, 4]]);
/// assert_eq!(result.outliers(), &[2]);
/// assert_eq!(result.assignments()[4], Some(ClusterId::new(1)));
/// assert_eq!(result.assignments()[2], None);
/// # Ok::<(), strata_core::InvalidClusterLayout>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    clusters: Vec<Vec<usize>>,
    outliers: Vec<usize>,
    point_count: usize,
}

/// Error returned when explicit clusters do not describe a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvalidClusterLayout {
    /// A cluster referenced a point outside `0..point_count`.
    #[error("point {point} is outside 0..{point_count}")]
    OutOfRange {
        /// The offending point index.
        point: usize,
        /// Number of points in the clustering.
        point_count: usize,
    },
    /// A point appeared in more than one cluster, or twice in one.
    #[error("point {point} is assigned more than once")]
    Overlap {
        /// The repeated point index.
        point: usize,
    },
    /// A cluster contained no points.
    #[error("cluster {cluster} is empty")]
    EmptyCluster {
        /// Position of the empty cluster in the input.
        cluster: usize,
    },
}

impl ClusteringResult {
    /// Builds a result in which every point is an outlier.
    ///
    /// # Examples
    /// ```
    /// use strata_core::ClusteringResult;
    ///
    /// let result = ClusteringResult::all_outliers(3);
    /// assert_eq!(result.cluster_count(), 0);
    /// assert_eq!(result.outliers(), &[0, 1, 2]);
    /// ```
    #[must_use]
    pub fn all_outliers(point_count: usize) -> Self {
        Self {
            clusters: Vec::new(),
            outliers: (0..point_count).collect(),
            point_count,
        }
    }

    /// Builds a result from explicit clusters; uncovered points become
    /// outliers.
    ///
    /// # Errors
    /// Returns [`InvalidClusterLayout::OutOfRange`] for indices outside
    /// `0..point_count`, [`InvalidClusterLayout::Overlap`] for repeated
    /// indices and [`InvalidClusterLayout::EmptyCluster`] for empty clusters.
    pub fn try_from_clusters(
        point_count: usize,
        clusters: Vec<Vec<usize>>,
    ) -> Result<Self, InvalidClusterLayout> {
        let mut covered = vec![false; point_count];
        for (cluster, points) in clusters.iter().enumerate() {
            if points.is_empty() {
                return Err(InvalidClusterLayout::EmptyCluster { cluster });
            }
            for &point in points {
                let slot = covered
                    .get_mut(point)
                    .ok_or(InvalidClusterLayout::OutOfRange { point, point_count })?;
                if *slot {
                    return Err(InvalidClusterLayout::Overlap { point });
                }
                *slot = true;
            }
        }
        Ok(Self::from_partition(point_count, clusters, &covered))
    }

    /// Assembles a result from clusters already known to be disjoint and in
    /// range.
    pub(crate) fn from_disjoint(point_count: usize, clusters: Vec<Vec<usize>>) -> Self {
        let mut covered = vec![false; point_count];
        for &point in clusters.iter().flatten() {
            covered[point] = true;
        }
        Self::from_partition(point_count, clusters, &covered)
    }

    fn from_partition(point_count: usize, mut clusters: Vec<Vec<usize>>, covered: &[bool]) -> Self {
        for points in &mut clusters {
            points.sort_unstable();
        }
        clusters.sort_unstable_by_key(|points| points.first().copied());
        let outliers = (0..point_count).filter(|&point| !covered[point]).collect();
        Self {
            clusters,
            outliers,
            point_count,
        }
    }

    /// Clusters as sorted point lists, ordered by smallest point.
    #[rustfmt::skip]
    #[must_use]
    pub fn clusters(&self) -> &[Vec<usize>] { &self.clusters }

    /// Points assigned to no cluster, ascending.
    #[rustfmt::skip]
    #[must_use]
    pub fn outliers(&self) -> &[usize] { &self.outliers }

    /// Number of points covered by the result.
    #[rustfmt::skip]
    #[must_use]
    pub fn point_count(&self) -> usize { self.point_count }

    /// Number of clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Points belonging to `id`, if such a cluster exists.
    #[must_use]
    pub fn cluster(&self, id: ClusterId) -> Option<&[usize]> {
        let index = usize::try_from(id.get()).ok()?;
        self.clusters.get(index).map(Vec::as_slice)
    }

    /// Per-point cluster membership, `None` for outliers.
    ///
    /// Cluster identifiers are positions in [`Self::clusters`].
    #[must_use]
    pub fn assignments(&self) -> Vec<Option<ClusterId>> {
        let mut assignments = vec![None; self.point_count];
        for (cluster, points) in self.clusters.iter().enumerate() {
            for &point in points {
                assignments[point] = Some(ClusterId::new(cluster as u64));
            }
        }
        assignments
    }
}

/// Identifier assigned to a cluster.
///
/// # Examples
/// ```
/// use strata_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> u64 { self.0 }
}
