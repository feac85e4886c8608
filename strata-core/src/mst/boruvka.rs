//! Parallel Borůvka construction driven by a nearest-neighbour oracle.

use rayon::{ThreadPoolBuilder, prelude::*};
use tracing::{Span, debug, field, instrument, warn};

use crate::{
    datasource::DataSource, distance::DistanceMetric, index::NearestNeighbourIndex,
    reachability::MutualReachability,
};

use super::{CheapestEdgeTable, Edge, MstConfig, MstError, MstStats, SpanningTree, UnionFind};

/// Builds an approximate mutual-reachability spanning tree with Borůvka
/// rounds.
///
/// Each round fans out over a bounded worker pool: every vertex queries the
/// oracle for its nearest neighbours, doubling the search width until it
/// finds one outside its own component, and offers the cheapest such edge to
/// its component's slot in a [`CheapestEdgeTable`]. After the barrier the
/// slots are committed serially in representative order. A round that
/// commits nothing falls back to a bounded search from the lowest-numbered
/// component, so every round makes progress.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use strata_core::{
///     BoruvkaMstBuilder, DataSource, DataSourceError, DistanceCache, ExactIndex, Metric,
///     MstConfig, MutualReachability,
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
/// let source = Line(vec![vec![0.0], vec![1.0], vec![3.0], vec![7.0]]);
/// let index = ExactIndex::from_source(&source, Metric::Euclidean)?;
/// let cache = DistanceCache::new();
/// let k = NonZeroUsize::new(1).expect("non-zero");
/// let oracle = MutualReachability::new(&source, index, &Metric::Euclidean, &cache, k);
///
/// let tree = BoruvkaMstBuilder::new(MstConfig::new(k)).build(&oracle)?;
/// assert_eq!(tree.edges().len(), 3);
/// assert_eq!(tree.total_weight(), 7.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BoruvkaMstBuilder {
    config: MstConfig,
}

impl BoruvkaMstBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: MstConfig) -> Self {
        Self { config }
    }

    /// Returns the builder configuration.
    #[rustfmt::skip]
    #[must_use]
    pub fn config(&self) -> &MstConfig { &self.config }

    /// Builds a spanning tree over every point the oracle knows about.
    ///
    /// # Errors
    /// Returns [`MstError::EmptyGraph`] for an empty data source,
    /// [`MstError::ThreadPool`] when the worker pool cannot start, and
    /// propagates oracle failures.
    #[instrument(
        name = "mst.boruvka",
        err,
        skip(self, oracle),
        fields(
            points = oracle.len(),
            workers = self.config.workers().get(),
            min_neighbours = self.config.min_neighbours().get(),
            rounds = field::Empty,
            forced_unions = field::Empty,
        ),
    )]
    pub fn build<D, I, M>(
        &self,
        oracle: &MutualReachability<'_, D, I, M>,
    ) -> Result<SpanningTree, MstError>
    where
        D: DataSource + Sync + ?Sized,
        I: NearestNeighbourIndex,
        M: DistanceMetric + ?Sized,
    {
        let point_count = oracle.len();
        if point_count == 0 {
            return Err(MstError::EmptyGraph);
        }

        let union_find = UnionFind::new(point_count);
        let table = CheapestEdgeTable::new(point_count);
        let mut edges = Vec::with_capacity(point_count - 1);
        let mut stats = MstStats::default();

        let workers = self.config.workers().get().min(point_count);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|err| MstError::ThreadPool {
                reason: err.to_string(),
            })?;
        let chunk_size = point_count.div_ceil(workers);

        while union_find.components()? > 1 {
            stats.rounds += 1;
            table.reset()?;

            pool.install(|| {
                (0..workers).into_par_iter().try_for_each(|chunk| {
                    let start = chunk * chunk_size;
                    let end = start.saturating_add(chunk_size).min(point_count);
                    let local = oracle.clone();
                    for vertex in start..end {
                        self.propose(&local, &union_find, &table, vertex)?;
                    }
                    Ok::<(), MstError>(())
                })
            })?;

            let committed = commit(&table, &union_find, &mut edges)?;
            if committed == 0 {
                let Some(edge) = self.force_union(oracle, &union_find)? else {
                    break;
                };
                edges.push(edge);
                stats.forced_unions += 1;
                record_forced_union();
            }

            debug!(
                round = stats.rounds,
                committed,
                components = union_find.components()?,
                "borůvka round complete"
            );
        }

        let span = Span::current();
        span.record("rounds", stats.rounds);
        span.record("forced_unions", stats.forced_unions);
        Ok(SpanningTree::new(point_count, edges, stats))
    }

    /// Offers the cheapest edge from `vertex` to another component.
    fn propose<D, I, M>(
        &self,
        oracle: &MutualReachability<'_, D, I, M>,
        union_find: &UnionFind,
        table: &CheapestEdgeTable,
        vertex: usize,
    ) -> Result<(), MstError>
    where
        D: DataSource + ?Sized,
        I: NearestNeighbourIndex,
        M: DistanceMetric + ?Sized,
    {
        let component = union_find.find(vertex)?;
        let point_count = oracle.len();
        let mut limit = self.config.min_neighbours().get().min(point_count);

        loop {
            let mut best: Option<Edge> = None;
            for neighbour in oracle.neighbours(vertex, limit)? {
                if neighbour == vertex || union_find.find(neighbour)? == component {
                    continue;
                }
                let weight = oracle.mutual_reachability(vertex, neighbour)?;
                let edge = Edge::new(vertex, neighbour, weight)?;
                if best.is_none_or(|current| edge < current) {
                    best = Some(edge);
                }
            }

            if let Some(edge) = best {
                table.update(component, edge)?;
                return Ok(());
            }
            if limit >= point_count {
                return Ok(());
            }
            limit = limit.saturating_mul(2).min(point_count);
        }
    }

    /// Unions the lowest-numbered component with its cheapest reachable
    /// representative among the other components.
    fn force_union<D, I, M>(
        &self,
        oracle: &MutualReachability<'_, D, I, M>,
        union_find: &UnionFind,
    ) -> Result<Option<Edge>, MstError>
    where
        D: DataSource + ?Sized,
        I: NearestNeighbourIndex,
        M: DistanceMetric + ?Sized,
    {
        let members = union_find.lowest_members()?;
        let Some((&base, others)) = members.split_first() else {
            return Ok(None);
        };

        let mut best: Option<Edge> = None;
        for &other in others
            .iter()
            .take(self.config.fallback_candidate_limit().get())
        {
            let weight = oracle.mutual_reachability(base, other)?;
            let edge = Edge::new(base, other, weight)?;
            if best.is_none_or(|current| edge < current) {
                best = Some(edge);
            }
        }

        if let Some(edge) = best {
            union_find.union(edge.source(), edge.target())?;
            warn!(
                source = edge.source(),
                target = edge.target(),
                weight = edge.weight(),
                components = others.len() + 1,
                "no cross-component neighbour found, forcing union"
            );
        }
        Ok(best)
    }
}

/// Commits the round's winners in ascending representative order, skipping
/// edges whose endpoints were joined earlier in the same pass.
fn commit(
    table: &CheapestEdgeTable,
    union_find: &UnionFind,
    edges: &mut Vec<Edge>,
) -> Result<usize, MstError> {
    let mut committed = 0;
    for edge in table.drain()? {
        if union_find.union(edge.source(), edge.target())? {
            edges.push(edge);
            committed += 1;
        }
    }
    Ok(committed)
}

#[cfg(feature = "metrics")]
fn record_forced_union() {
    metrics::counter!("mst_forced_unions").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_forced_union() {}
