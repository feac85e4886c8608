//! Single-threaded Prim construction, the reference "vanilla" builder.

use std::{cmp::Reverse, collections::BinaryHeap};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{Span, field, instrument, warn};

use crate::{
    datasource::DataSource, distance::DistanceMetric, index::NearestNeighbourIndex,
    reachability::MutualReachability,
};

use super::{Edge, MstConfig, MstError, MstStats, SpanningTree};

/// Grows one spanning tree from a seeded random start vertex.
///
/// Every newly attached vertex pushes edges to its unvisited neighbours onto
/// a min-heap, doubling the neighbour search until it finds one or reaches
/// half of the point set. When the heap runs dry before every point is
/// attached, a bounded search over visited × unvisited pairs supplies the
/// next edge.
#[derive(Clone, Copy, Debug)]
pub struct PrimMstBuilder {
    config: MstConfig,
}

impl PrimMstBuilder {
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
    /// Returns [`MstError::EmptyGraph`] for an empty data source and
    /// propagates oracle failures.
    #[instrument(
        name = "mst.prim",
        err,
        skip(self, oracle),
        fields(
            points = oracle.len(),
            seed = self.config.seed(),
            start = field::Empty,
            forced_unions = field::Empty,
        ),
    )]
    pub fn build<D, I, M>(
        &self,
        oracle: &MutualReachability<'_, D, I, M>,
    ) -> Result<SpanningTree, MstError>
    where
        D: DataSource + ?Sized,
        I: NearestNeighbourIndex,
        M: DistanceMetric + ?Sized,
    {
        let point_count = oracle.len();
        if point_count == 0 {
            return Err(MstError::EmptyGraph);
        }

        let mut rng = SmallRng::seed_from_u64(self.config.seed());
        let start = rng.gen_range(0..point_count);
        Span::current().record("start", start);

        let mut visited = vec![false; point_count];
        visited[start] = true;
        let mut attached = 1;
        let mut heap = BinaryHeap::new();
        let mut edges = Vec::with_capacity(point_count - 1);
        let mut stats = MstStats::default();

        self.push_frontier(oracle, start, &visited, &mut heap)?;

        while attached < point_count {
            let edge = match heap.pop() {
                Some(Reverse(edge)) => edge,
                None => {
                    let Some(edge) = self.global_search(oracle, &visited)? else {
                        break;
                    };
                    stats.forced_unions += 1;
                    warn!(
                        source = edge.source(),
                        target = edge.target(),
                        weight = edge.weight(),
                        attached,
                        "frontier exhausted, attaching via global search"
                    );
                    edge
                }
            };

            let next = if visited[edge.source()] {
                edge.target()
            } else {
                edge.source()
            };
            if visited[next] {
                continue;
            }
            visited[next] = true;
            attached += 1;
            edges.push(edge);
            self.push_frontier(oracle, next, &visited, &mut heap)?;
        }

        Span::current().record("forced_unions", stats.forced_unions);
        Ok(SpanningTree::new(point_count, edges, stats))
    }

    fn push_frontier<D, I, M>(
        &self,
        oracle: &MutualReachability<'_, D, I, M>,
        vertex: usize,
        visited: &[bool],
        heap: &mut BinaryHeap<Reverse<Edge>>,
    ) -> Result<(), MstError>
    where
        D: DataSource + ?Sized,
        I: NearestNeighbourIndex,
        M: DistanceMetric + ?Sized,
    {
        let point_count = oracle.len();
        let ceiling = (point_count / 2).max(1);
        let mut limit = self.config.min_neighbours().get().min(point_count);

        loop {
            let fresh: Vec<usize> = oracle
                .neighbours(vertex, limit)?
                .into_iter()
                .filter(|&neighbour| !visited[neighbour])
                .collect();

            if !fresh.is_empty() || limit >= ceiling || limit >= point_count {
                for neighbour in fresh {
                    let weight = oracle.mutual_reachability(vertex, neighbour)?;
                    heap.push(Reverse(Edge::new(vertex, neighbour, weight)?));
                }
                return Ok(());
            }
            limit = limit.saturating_mul(2).min(point_count);
        }
    }

    /// Cheapest edge between any visited vertex and the first unvisited
    /// vertices, up to the fallback candidate limit.
    fn global_search<D, I, M>(
        &self,
        oracle: &MutualReachability<'_, D, I, M>,
        visited: &[bool],
    ) -> Result<Option<Edge>, MstError>
    where
        D: DataSource + ?Sized,
        I: NearestNeighbourIndex,
        M: DistanceMetric + ?Sized,
    {
        let candidates: Vec<usize> = (0..visited.len())
            .filter(|&vertex| !visited[vertex])
            .take(self.config.fallback_candidate_limit().get())
            .collect();

        let mut best: Option<Edge> = None;
        for inside in (0..visited.len()).filter(|&vertex| visited[vertex]) {
            for &outside in &candidates {
                let weight = oracle.mutual_reachability(inside, outside)?;
                let edge = Edge::new(inside, outside, weight)?;
                if best.is_none_or(|current| edge < current) {
                    best = Some(edge);
                }
            }
        }
        Ok(best)
    }
}
