//! Point-cloud strategies for spanning tree property tests.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::types::{MstFixture, PointLayout};

const MIN_POINTS: usize = 6;
const MAX_POINTS: usize = 40;
const MAX_DIMENSION: usize = 4;
const MAX_NEIGHBOURS: usize = 5;

/// Samples a layout, a seed and a neighbour count, then expands them into a
/// concrete fixture.
pub(super) fn mst_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (any::<PointLayout>(), any::<u64>(), 1..=MAX_NEIGHBOURS).prop_map(
        |(layout, seed, neighbours)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_fixture(layout, neighbours, &mut rng)
        },
    )
}

/// Builds a fixture for an explicit layout.
pub(super) fn generate_fixture(
    layout: PointLayout,
    neighbours: usize,
    rng: &mut SmallRng,
) -> MstFixture {
    let count = rng.gen_range(MIN_POINTS..=MAX_POINTS);
    let dimension = rng.gen_range(1..=MAX_DIMENSION);
    let rows = match layout {
        PointLayout::Uniform => uniform(rng, count, dimension, 10.0),
        PointLayout::Clustered => clustered(rng, count, dimension),
        PointLayout::Duplicates => duplicated(rng, count, dimension),
        PointLayout::Lattice => (0..count).map(|step| vec![step as f32 * 0.5]).collect(),
    };
    MstFixture {
        rows,
        layout,
        min_neighbours: NonZeroUsize::new(neighbours).unwrap_or(NonZeroUsize::MIN),
    }
}

fn uniform(rng: &mut SmallRng, count: usize, dimension: usize, bound: f32) -> Vec<Vec<f32>> {
    (0..count)
        .map(|_| (0..dimension).map(|_| rng.gen_range(-bound..=bound)).collect())
        .collect()
}

fn clustered(rng: &mut SmallRng, count: usize, dimension: usize) -> Vec<Vec<f32>> {
    let centroid_count = rng.gen_range(2..=4);
    let centroids = uniform(rng, centroid_count, dimension, 100.0);
    (0..count)
        .map(|point| {
            let centroid = &centroids[point % centroids.len()];
            centroid
                .iter()
                .map(|axis| axis + rng.gen_range(-1.0..=1.0))
                .collect()
        })
        .collect()
}

fn duplicated(rng: &mut SmallRng, count: usize, dimension: usize) -> Vec<Vec<f32>> {
    let distinct = uniform(rng, count / 2, dimension, 10.0);
    (0..count)
        .map(|point| distinct[point % distinct.len()].clone())
        .collect()
}
