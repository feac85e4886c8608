//! HDBSCAN orchestration.
//!
//! Provides the [`Hdbscan`] entry point, which wires a data source, the
//! injected nearest-neighbour index and metric through spanning tree
//! construction, the dendrogram, condensation and cluster extraction.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{Span, field, info, instrument, warn};

use crate::{
    Result,
    builder::MstStrategy,
    datasource::DataSource,
    distance::DistanceMetric,
    error::ClusteringError,
    hierarchy::Dendrogram,
    index::NearestNeighbourIndex,
    mst::{BoruvkaMstBuilder, MstConfig, PrimMstBuilder, SpanningTree},
    reachability::{DistanceCache, MutualReachability},
    result::ClusteringResult,
};

/// Density-based hierarchical clusterer.
///
/// Construct one with [`crate::HdbscanBuilder`]. Runs share nothing, so the
/// same instance can cluster any number of sources.
///
/// # Examples
/// ```
/// use strata_core::{DataSource, DataSourceError, ExactIndex, HdbscanBuilder, Metric};
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
/// let source = Line(
///     [0.0, 0.1, 0.2, 10.0, 10.1, 10.2, 100.0]
///         .into_iter()
///         .map(|x| vec![x])
///         .collect(),
/// );
/// let index = ExactIndex::from_source(&source, Metric::Euclidean)?;
/// let hdbscan = HdbscanBuilder::new()
///     .with_min_neighbours(2)
///     .with_min_cluster_size(2)
///     .build(index, Metric::Euclidean)?;
///
/// let result = hdbscan.cluster(&source)?;
/// assert_eq!(result.clusters(), &[vec![0, 1, 2], vec![3, 4, 5]]);
/// assert_eq!(result.outliers(), &[6]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Hdbscan<I, M> {
    min_cluster_size: NonZeroUsize,
    strategy: MstStrategy,
    mst: MstConfig,
    index: I,
    metric: M,
}

impl<I, M> Hdbscan<I, M>
where
    I: NearestNeighbourIndex,
    M: DistanceMetric,
{
    pub(crate) fn new(
        min_cluster_size: NonZeroUsize,
        strategy: MstStrategy,
        mst: MstConfig,
        index: I,
        metric: M,
    ) -> Self {
        Self {
            min_cluster_size,
            strategy,
            mst,
            index,
            metric,
        }
    }

    /// Neighbour count used for core distances.
    #[must_use]
    pub fn min_neighbours(&self) -> NonZeroUsize {
        self.mst.min_neighbours()
    }

    /// Smallest number of points a cluster may hold.
    #[rustfmt::skip]
    #[must_use]
    pub fn min_cluster_size(&self) -> NonZeroUsize { self.min_cluster_size }

    /// Spanning tree strategy.
    #[rustfmt::skip]
    #[must_use]
    pub fn strategy(&self) -> MstStrategy { self.strategy }

    /// Spanning tree parameters: workers, seed and fallback bound.
    #[rustfmt::skip]
    #[must_use]
    pub fn mst_config(&self) -> &MstConfig { &self.mst }

    /// The injected nearest-neighbour index.
    #[rustfmt::skip]
    #[must_use]
    pub fn index(&self) -> &I { &self.index }

    /// The injected distance metric.
    #[rustfmt::skip]
    #[must_use]
    pub fn metric(&self) -> &M { &self.metric }

    /// Clusters every point of `source`.
    ///
    /// # Errors
    /// See [`Self::run`].
    pub fn cluster<D>(&self, source: &D) -> Result<ClusteringResult>
    where
        D: DataSource + Sync + ?Sized,
    {
        self.run(source).map(ClusteringRun::into_result)
    }

    /// Clusters every point of `source`, keeping the spanning tree and the
    /// condensed dendrogram alongside the result.
    ///
    /// Sources with a single point, or with fewer points than
    /// `min_cluster_size`, produce no tree and report every point as an
    /// outlier.
    ///
    /// # Errors
    /// Returns [`ClusteringError::EmptySource`] when `source` is empty,
    /// [`ClusteringError::IndexLengthMismatch`] when the index covers a
    /// different number of points, [`ClusteringError::Mst`] when a
    /// collaborator fails during spanning tree construction and
    /// [`ClusteringError::Dendrogram`] when the tree cannot be folded into a
    /// dendrogram.
    #[instrument(
        name = "core.cluster",
        err,
        skip(self, source),
        fields(
            data_source = %source.name(),
            items = source.len(),
            min_cluster_size = self.min_cluster_size.get(),
            min_neighbours = self.mst.min_neighbours().get(),
            strategy = %self.strategy,
            clusters = field::Empty,
        ),
    )]
    pub fn run<D>(&self, source: &D) -> Result<ClusteringRun>
    where
        D: DataSource + Sync + ?Sized,
    {
        let items = source.len();
        if items == 0 {
            warn!(
                data_source = source.name(),
                "data source is empty, returning error"
            );
            return Err(ClusteringError::EmptySource {
                data_source: Arc::from(source.name()),
            });
        }
        if self.index.len() != items {
            return Err(ClusteringError::IndexLengthMismatch {
                data_source: Arc::from(source.name()),
                items,
                indexed: self.index.len(),
            });
        }
        if items < 2 || items < self.min_cluster_size.get() {
            warn!(
                data_source = source.name(),
                items,
                min_cluster_size = self.min_cluster_size.get(),
                "too few items to form a cluster, reporting every item as an outlier"
            );
            Span::current().record("clusters", 0);
            return Ok(ClusteringRun {
                result: ClusteringResult::all_outliers(items),
                spanning_tree: None,
                dendrogram: None,
            });
        }

        let cache = DistanceCache::with_capacity(items);
        let oracle = MutualReachability::new(
            source,
            self.index.clone(),
            &self.metric,
            &cache,
            self.mst.min_neighbours(),
        );
        let tree = match self.strategy {
            MstStrategy::Boruvka => BoruvkaMstBuilder::new(self.mst).build(&oracle),
            MstStrategy::Prim => PrimMstBuilder::new(self.mst).build(&oracle),
        }
        .map_err(|error| ClusteringError::Mst {
            data_source: Arc::from(source.name()),
            error,
        })?;

        let mut dendrogram = Dendrogram::from_mst(items, tree.edges()).map_err(|error| {
            ClusteringError::Dendrogram {
                data_source: Arc::from(source.name()),
                error,
            }
        })?;
        dendrogram.condense(self.min_cluster_size);

        let clusters = dendrogram
            .extract_clusters()
            .into_iter()
            .map(|id| {
                dendrogram
                    .node(id)
                    .map(|node| node.points().to_vec())
                    .map_err(|error| ClusteringError::Dendrogram {
                        data_source: Arc::from(source.name()),
                        error,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let result = ClusteringResult::from_disjoint(items, clusters);

        Span::current().record("clusters", result.cluster_count());
        info!(
            clusters = result.cluster_count(),
            outliers = result.outliers().len(),
            total_weight = tree.total_weight(),
            forced_unions = tree.stats().forced_unions,
            "clustering complete"
        );
        Ok(ClusteringRun {
            result,
            spanning_tree: Some(tree),
            dendrogram: Some(dendrogram),
        })
    }
}

/// Output of [`Hdbscan::run`]: the flat clustering plus the intermediate
/// structures it was derived from.
#[derive(Debug, Clone)]
pub struct ClusteringRun {
    result: ClusteringResult,
    spanning_tree: Option<SpanningTree>,
    dendrogram: Option<Dendrogram>,
}

impl ClusteringRun {
    /// The flat clustering.
    #[rustfmt::skip]
    #[must_use]
    pub fn result(&self) -> &ClusteringResult { &self.result }

    /// The mutual-reachability spanning tree, absent for degenerate inputs.
    #[must_use]
    pub fn spanning_tree(&self) -> Option<&SpanningTree> {
        self.spanning_tree.as_ref()
    }

    /// The condensed dendrogram, absent for degenerate inputs.
    #[must_use]
    pub fn dendrogram(&self) -> Option<&Dendrogram> {
        self.dendrogram.as_ref()
    }

    /// Discards the intermediate structures.
    #[must_use]
    pub fn into_result(self) -> ClusteringResult {
        self.result
    }
}
