//! Repeatability across runs and worker counts.

use std::num::NonZeroUsize;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    mst::{BoruvkaMstBuilder, MstConfig, PrimMstBuilder, SpanningTree},
    reachability::DistanceCache,
};

use super::types::{Harness, MstFixture};

const WORKER_COUNTS: [usize; 4] = [1, 2, 3, 8];

/// Borůvka returns the same edge list whatever the worker count, and Prim
/// returns the same edge list for the same seed.
pub(super) fn run_determinism_property(fixture: &MstFixture) -> TestCaseResult {
    let harness = Harness::new(fixture);
    let base = MstConfig::new(fixture.min_neighbours);

    let mut baseline: Option<SpanningTree> = None;
    for workers in WORKER_COUNTS {
        let workers = NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN);
        let cache = DistanceCache::new();
        let oracle = harness.oracle(harness.index().clone(), &cache, fixture.min_neighbours);
        let tree = BoruvkaMstBuilder::new(base.with_workers(workers))
            .build(&oracle)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        match &baseline {
            Some(expected) if *expected != tree => {
                return Err(TestCaseError::fail(format!(
                    "{workers} workers diverged from the single-worker tree (layout={:?})",
                    fixture.layout
                )));
            }
            Some(_) => {}
            None => baseline = Some(tree),
        }
    }

    let prim = |seed: u64| {
        let cache = DistanceCache::new();
        let oracle = harness.oracle(harness.index().clone(), &cache, fixture.min_neighbours);
        PrimMstBuilder::new(base.with_seed(seed)).build(&oracle)
    };
    let first = prim(7).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let second = prim(7).map_err(|err| TestCaseError::fail(err.to_string()))?;
    if first != second {
        return Err(TestCaseError::fail("prim differs between runs with one seed"));
    }
    Ok(())
}
