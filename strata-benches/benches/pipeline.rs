//! End-to-end HDBSCAN benchmarks.
//!
//! Times [`strata_core::Hdbscan::cluster`] from a cold core-distance cache to
//! the flat clustering, for each spanning tree strategy.
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

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use strata_benches::{
    error::BenchSetupError,
    params::PipelineBenchParams,
    source::{GaussianBlobConfig, SyntheticSource},
};
use strata_core::{ExactIndex, HdbscanBuilder, Metric, MstStrategy};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Vector dimensionality for all benchmark datasets.
const DIMENSIONS: usize = 16;

/// Dataset sizes to benchmark.
const POINT_COUNTS: &[usize] = &[250, 500, 1_000];

const STRATEGIES: &[MstStrategy] = &[MstStrategy::Boruvka, MstStrategy::Prim];

#[expect(
    clippy::panic_in_result_fn,
    reason = "Criterion measurement closures cannot propagate errors via Result"
)]
fn hdbscan_pipeline_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("hdbscan_pipeline");
    group.sample_size(10);

    for &point_count in POINT_COUNTS {
        let source = SyntheticSource::generate_gaussian_blobs(&GaussianBlobConfig::separated(
            point_count,
            DIMENSIONS,
            SEED,
        ))?;

        for &strategy in STRATEGIES {
            let index = ExactIndex::from_source(&source, Metric::Euclidean)?;
            let hdbscan = HdbscanBuilder::new()
                .with_min_neighbours(5)
                .with_min_cluster_size(10)
                .with_strategy(strategy)
                .with_seed(SEED)
                .build(index, Metric::Euclidean)?;
            let params = PipelineBenchParams {
                point_count,
                strategy,
            };

            group.bench_with_input(
                BenchmarkId::from_parameter(params),
                &source,
                |b, source| {
                    b.iter(|| match hdbscan.cluster(source) {
                        Ok(result) => result,
                        Err(err) => panic!("{strategy} pipeline failed during benchmark: {err}"),
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn hdbscan_pipeline(c: &mut Criterion) {
    if let Err(err) = hdbscan_pipeline_impl(c) {
        panic!("hdbscan_pipeline benchmark setup failed: {err}");
    }
}

criterion_group!(benches, hdbscan_pipeline);
criterion_main!(benches);
