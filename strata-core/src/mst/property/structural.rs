//! Structural invariants shared by both builders.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    distance::Metric,
    index::NearestNeighbourIndex,
    mst::{BoruvkaMstBuilder, MstConfig, PrimMstBuilder, SpanningTree},
    reachability::{DistanceCache, MutualReachability},
    test_utils::{SelfOnlyIndex, VecSource, count_components},
};

use super::types::{Harness, MstFixture};

/// Both builders emit `n - 1` canonical edges that connect every point and
/// whose weights match the oracle.
pub(super) fn run_structural_invariants_property(fixture: &MstFixture) -> TestCaseResult {
    let harness = Harness::new(fixture);
    let config = MstConfig::new(fixture.min_neighbours);

    let cache = DistanceCache::new();
    let oracle = harness.oracle(harness.index().clone(), &cache, fixture.min_neighbours);
    let boruvka = BoruvkaMstBuilder::new(config)
        .build(&oracle)
        .map_err(|err| TestCaseError::fail(format!("boruvka failed: {err} ({fixture:?})")))?;
    check_tree(&boruvka, &oracle, fixture)?;

    let prim = PrimMstBuilder::new(config)
        .build(&oracle)
        .map_err(|err| TestCaseError::fail(format!("prim failed: {err} ({fixture:?})")))?;
    check_tree(&prim, &oracle, fixture)
}

/// With an index that never returns another point, every Borůvka union is
/// forced and the result is still a spanning tree.
pub(super) fn run_forced_union_property(fixture: &MstFixture) -> TestCaseResult {
    let harness = Harness::new(fixture);
    let cache = DistanceCache::new();
    let index = SelfOnlyIndex::new(harness.index().clone());
    let oracle = harness.oracle(index, &cache, fixture.min_neighbours);
    let tree = BoruvkaMstBuilder::new(MstConfig::new(fixture.min_neighbours))
        .build(&oracle)
        .map_err(|err| TestCaseError::fail(format!("boruvka failed: {err}")))?;

    check_tree(&tree, &oracle, fixture)?;
    if tree.stats().forced_unions != harness.len() - 1 {
        return Err(TestCaseError::fail(format!(
            "expected {} forced unions, got {} (layout={:?})",
            harness.len() - 1,
            tree.stats().forced_unions,
            fixture.layout,
        )));
    }
    Ok(())
}

fn check_tree<I: NearestNeighbourIndex>(
    tree: &SpanningTree,
    oracle: &MutualReachability<'_, VecSource, I, Metric>,
    fixture: &MstFixture,
) -> TestCaseResult {
    let n = oracle.len();
    if tree.point_count() != n || tree.edges().len() != n - 1 {
        return Err(TestCaseError::fail(format!(
            "expected {} edges over {n} points, got {} over {} (layout={:?})",
            n - 1,
            tree.edges().len(),
            tree.point_count(),
            fixture.layout,
        )));
    }

    for edge in tree.edges() {
        if edge.source() >= edge.target() || edge.target() >= n {
            return Err(TestCaseError::fail(format!("non-canonical edge {edge:?}")));
        }
        let expected = oracle
            .mutual_reachability(edge.source(), edge.target())
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        if edge.weight() != expected {
            return Err(TestCaseError::fail(format!(
                "edge {edge:?} weight differs from oracle value {expected}"
            )));
        }
    }
    if !tree.edges().is_sorted() {
        return Err(TestCaseError::fail("edges are not in ascending order"));
    }

    let pairs: Vec<_> = tree
        .edges()
        .iter()
        .map(|edge| (edge.source(), edge.target()))
        .collect();
    let components = count_components(n, &pairs);
    if components != 1 {
        return Err(TestCaseError::fail(format!(
            "tree leaves {components} components (layout={:?})",
            fixture.layout
        )));
    }
    Ok(())
}
