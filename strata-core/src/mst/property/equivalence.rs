//! Tree weight against the dense reference.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    mst::{BoruvkaMstBuilder, MstConfig, PrimMstBuilder},
    reachability::DistanceCache,
    test_utils::SelfOnlyIndex,
};

use super::{
    oracle::{exact_tree_weight, weights_match},
    types::{Harness, MstFixture},
};

/// Neither builder beats the true minimum. With one neighbour every core
/// distance is zero, nearest-neighbour order agrees with edge order and
/// Borůvka recovers the exact tree. Prim driven purely by global search is
/// exact for any neighbour count.
pub(super) fn run_reference_equivalence_property(fixture: &MstFixture) -> TestCaseResult {
    let harness = Harness::new(fixture);
    let cache = DistanceCache::new();
    let oracle = harness.oracle(harness.index().clone(), &cache, fixture.min_neighbours);
    let exact = exact_tree_weight(&oracle).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let slack = 1e-9 * exact.abs().max(1.0);
    let config = MstConfig::new(fixture.min_neighbours);

    let boruvka = BoruvkaMstBuilder::new(config)
        .build(&oracle)
        .map_err(|err| TestCaseError::fail(err.to_string()))?
        .total_weight();
    let prim = PrimMstBuilder::new(config)
        .build(&oracle)
        .map_err(|err| TestCaseError::fail(err.to_string()))?
        .total_weight();

    for (name, weight) in [("boruvka", boruvka), ("prim", prim)] {
        if weight < exact - slack {
            return Err(TestCaseError::fail(format!(
                "{name} weight {weight} is below the minimum {exact} ({fixture:?})"
            )));
        }
    }
    if fixture.min_neighbours.get() == 1 && !weights_match(boruvka, exact) {
        return Err(TestCaseError::fail(format!(
            "boruvka weight {boruvka} differs from exact {exact} (layout={:?})",
            fixture.layout
        )));
    }

    let global_cache = DistanceCache::new();
    let global = harness.oracle(
        SelfOnlyIndex::new(harness.index().clone()),
        &global_cache,
        fixture.min_neighbours,
    );
    let exact_global =
        exact_tree_weight(&global).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let prim_global = PrimMstBuilder::new(config)
        .build(&global)
        .map_err(|err| TestCaseError::fail(err.to_string()))?
        .total_weight();
    if !weights_match(prim_global, exact_global) {
        return Err(TestCaseError::fail(format!(
            "global-search prim weight {prim_global} differs from exact {exact_global}"
        )));
    }
    Ok(())
}
