//! Fixture types for spanning tree property tests.

use std::num::NonZeroUsize;

use test_strategy::Arbitrary;

use crate::{
    distance::Metric,
    index::ExactIndex,
    reachability::{DistanceCache, MutualReachability},
    test_utils::VecSource,
};

/// Shape of the generated point cloud.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum PointLayout {
    /// Points sampled uniformly in a small hypercube.
    #[weight(3)]
    Uniform,
    /// Tight blobs around well-separated centroids, so most Borůvka rounds
    /// must widen their search to cross between blobs.
    #[weight(3)]
    Clustered,
    /// Uniform points with exact duplicates, stressing zero-weight ties.
    #[weight(2)]
    Duplicates,
    /// Evenly spaced points on a line, where every gap ties.
    #[weight(1)]
    Lattice,
}

/// Generated input for one property case.
#[derive(Clone, Debug)]
pub(super) struct MstFixture {
    /// Row-major point coordinates.
    pub rows: Vec<Vec<f32>>,
    /// Layout used to generate the rows.
    pub layout: PointLayout,
    /// Neighbour count for core distances.
    pub min_neighbours: NonZeroUsize,
}

/// Owns the data and index a fixture's oracles borrow from.
pub(super) struct Harness {
    source: VecSource,
    index: ExactIndex<Metric>,
    metric: Metric,
}

impl Harness {
    pub(super) fn new(fixture: &MstFixture) -> Self {
        let source = VecSource::new(fixture.rows.clone());
        let metric = Metric::Euclidean;
        let index = ExactIndex::from_source(&source, metric).expect("generated rows are uniform");
        Self {
            source,
            index,
            metric,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.source.rows().len()
    }

    pub(super) fn index(&self) -> &ExactIndex<Metric> {
        &self.index
    }

    pub(super) fn oracle<'a, I>(
        &'a self,
        index: I,
        cache: &'a DistanceCache,
        min_neighbours: NonZeroUsize,
    ) -> MutualReachability<'a, VecSource, I, Metric>
    where
        I: crate::index::NearestNeighbourIndex,
    {
        MutualReachability::new(&self.source, index, &self.metric, cache, min_neighbours)
    }
}
