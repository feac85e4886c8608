//! Dense reference spanning tree over the full mutual-reachability matrix.

use crate::{
    datasource::DataSource,
    distance::DistanceMetric,
    index::NearestNeighbourIndex,
    reachability::{MutualReachability, ReachabilityError},
};

/// Weight of a true minimum spanning tree, found by O(n²) Prim over every
/// pair.
pub(super) fn exact_tree_weight<D, I, M>(
    oracle: &MutualReachability<'_, D, I, M>,
) -> Result<f64, ReachabilityError>
where
    D: DataSource + ?Sized,
    I: NearestNeighbourIndex,
    M: DistanceMetric + ?Sized,
{
    let n = oracle.len();
    let mut attached = vec![false; n];
    let mut cheapest = vec![f64::INFINITY; n];
    let mut total = 0.0;
    if n == 0 {
        return Ok(total);
    }
    cheapest[0] = 0.0;

    for _ in 0..n {
        let Some(next) = (0..n)
            .filter(|&vertex| !attached[vertex])
            .min_by(|&a, &b| cheapest[a].total_cmp(&cheapest[b]))
        else {
            break;
        };
        attached[next] = true;
        total += cheapest[next];
        for other in (0..n).filter(|&vertex| !attached[vertex]) {
            let weight = oracle.mutual_reachability(next, other)?;
            if weight < cheapest[other] {
                cheapest[other] = weight;
            }
        }
    }
    Ok(total)
}

/// Compares tree weights up to summation-order rounding.
pub(super) fn weights_match(left: f64, right: f64) -> bool {
    left == right || (left - right).abs() <= 1e-9 * left.abs().max(right.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use crate::{
        distance::Metric, index::ExactIndex, reachability::DistanceCache, test_utils::VecSource,
    };

    use super::*;

    #[test]
    fn reference_tree_on_a_line() {
        let source = VecSource::from_scalars(&[0.0, 1.0, 3.0, 7.0]);
        let index = ExactIndex::from_source(&source, Metric::Euclidean).expect("index");
        let cache = DistanceCache::new();
        let oracle =
            MutualReachability::new(&source, index, &Metric::Euclidean, &cache, NonZeroUsize::MIN);
        assert_eq!(exact_tree_weight(&oracle).expect("weight"), 7.0);
    }

    #[test]
    fn weight_comparison_tolerates_rounding_only() {
        assert!(weights_match(f64::INFINITY, f64::INFINITY));
        assert!(weights_match(100.0, 100.0 + 1e-12));
        assert!(!weights_match(100.0, 100.1));
    }
}
