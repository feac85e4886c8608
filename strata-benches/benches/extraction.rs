//! Hierarchy benchmarks.
//!
//! Measures dendrogram construction, condensation and flat cluster
//! extraction from a precomputed spanning tree, isolating the hierarchy stage
//! from neighbour search and tree construction.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
#![expect(
    clippy::excessive_nesting,
    reason = "Criterion bench_with_input + b.iter pattern requires deep nesting"
)]

use std::num::NonZeroUsize;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use strata_benches::{
    error::BenchSetupError,
    params::ExtractionBenchParams,
    source::{GaussianBlobConfig, SyntheticSource},
};
use strata_core::{
    BoruvkaMstBuilder, Dendrogram, DistanceCache, ExactIndex, Metric, MstConfig,
    MutualReachability,
};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 16;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[250, 500, 1_000];

/// Minimum cluster sizes to benchmark.
const MIN_CLUSTER_SIZES: &[usize] = &[5, 25];

/// Neighbour count for core distances.
const MIN_NEIGHBOURS: usize = 5;

#[expect(
    clippy::panic_in_result_fn,
    reason = "Criterion measurement closures cannot propagate errors via Result"
)]
fn condense_and_extract_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("condense_and_extract");
    group.sample_size(20);

    let min_neighbours = NonZeroUsize::new(MIN_NEIGHBOURS).ok_or(BenchSetupError::ZeroValue {
        context: "min_neighbours",
    })?;

    for &point_count in POINT_COUNTS {
        let source = SyntheticSource::generate_gaussian_blobs(&GaussianBlobConfig::separated(
            point_count,
            DIMENSIONS,
            SEED,
        ))?;
        let index = ExactIndex::from_source(&source, Metric::Euclidean)?;
        let cache = DistanceCache::with_capacity(point_count);
        let oracle =
            MutualReachability::new(&source, index, &Metric::Euclidean, &cache, min_neighbours);
        let tree = BoruvkaMstBuilder::new(MstConfig::new(min_neighbours)).build(&oracle)?;
        let edges = tree.edges();

        for &min_size in MIN_CLUSTER_SIZES {
            let min_cluster_size =
                NonZeroUsize::new(min_size).ok_or(BenchSetupError::ZeroValue {
                    context: "min_cluster_size",
                })?;
            let params = ExtractionBenchParams {
                point_count,
                min_cluster_size: min_size,
            };

            group.bench_with_input(
                BenchmarkId::from_parameter(params),
                &(point_count, edges),
                |b, &(point_count, edges)| {
                    b.iter(|| {
                        let mut dendrogram = match Dendrogram::from_mst(point_count, edges) {
                            Ok(dendrogram) => dendrogram,
                            Err(err) => panic!("dendrogram failed during benchmark: {err}"),
                        };
                        dendrogram.condense(min_cluster_size);
                        dendrogram.extract_clusters()
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn condense_and_extract(c: &mut Criterion) {
    if let Err(err) = condense_and_extract_impl(c) {
        panic!("condense_and_extract benchmark setup failed: {err}");
    }
}

criterion_group!(benches, condense_and_extract);
criterion_main!(benches);
