//! Union-find property: random union sequences agree with a breadth-first
//! connectivity labelling of the same pair graph.

use std::collections::VecDeque;

use proptest::prelude::*;

use super::super::UnionFind;

const MAX_ELEMENTS: usize = 48;

/// Generated input: an element count and the unions applied to it.
#[derive(Clone, Debug)]
pub(super) struct UnionSequence {
    pub len: usize,
    pub pairs: Vec<(usize, usize)>,
}

pub(super) fn union_sequence_strategy() -> impl Strategy<Value = UnionSequence> {
    (1..=MAX_ELEMENTS).prop_flat_map(|len| {
        prop::collection::vec((0..len, 0..len), 0..=2 * len)
            .prop_map(move |pairs| UnionSequence { len, pairs })
    })
}

/// Labels each element with the lowest element reachable from it.
fn reference_labels(len: usize, pairs: &[(usize, usize)]) -> Vec<usize> {
    let mut adjacency = vec![Vec::new(); len];
    for &(left, right) in pairs {
        adjacency[left].push(right);
        adjacency[right].push(left);
    }

    let mut labels = vec![usize::MAX; len];
    for start in 0..len {
        if labels[start] != usize::MAX {
            continue;
        }
        labels[start] = start;
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node] {
                if labels[next] == usize::MAX {
                    labels[next] = start;
                    queue.push_back(next);
                }
            }
        }
    }
    labels
}

pub(super) fn run_union_find_reference_property(
    sequence: &UnionSequence,
) -> Result<(), TestCaseError> {
    let union_find = UnionFind::new(sequence.len);
    let mut merges = 0;
    for &(left, right) in &sequence.pairs {
        if union_find
            .union(left, right)
            .map_err(|err| TestCaseError::fail(err.to_string()))?
        {
            merges += 1;
        }
    }

    let labels = reference_labels(sequence.len, &sequence.pairs);
    let roots = (0..sequence.len)
        .map(|node| union_find.find(node))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    for left in 0..sequence.len {
        for right in 0..sequence.len {
            prop_assert_eq!(
                roots[left] == roots[right],
                labels[left] == labels[right],
                "elements {} and {} disagree with the reference",
                left,
                right
            );
        }
    }

    let mut distinct = labels.clone();
    distinct.sort_unstable();
    distinct.dedup();
    let components = union_find
        .components()
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    prop_assert_eq!(components, distinct.len());
    prop_assert_eq!(merges, sequence.len - components);

    let mut lowest = union_find
        .lowest_members()
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    lowest.sort_unstable();
    prop_assert_eq!(lowest, distinct);
    Ok(())
}
