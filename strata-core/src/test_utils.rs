//! Shared test utilities for `strata-core`.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use proptest::test_runner::Config as ProptestConfig;
use strata_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::{
    datasource::DataSource,
    error::DataSourceError,
    index::{IndexError, NO_NEIGHBOUR, NearestNeighbourIndex},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `STRATA_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// In-memory [`DataSource`] over owned rows.
#[derive(Clone, Debug)]
pub(crate) struct VecSource {
    rows: Vec<Vec<f32>>,
}

impl VecSource {
    #[must_use]
    pub(crate) fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    /// Builds a one-dimensional source from scalar positions.
    #[must_use]
    pub(crate) fn from_scalars(values: &[f32]) -> Self {
        Self::new(values.iter().map(|value| vec![*value]).collect())
    }

    #[must_use]
    pub(crate) fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }
}

impl DataSource for VecSource {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn name(&self) -> &str {
        "vec"
    }

    fn vector(&self, index: usize) -> Result<&[f32], DataSourceError> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DataSourceError::OutOfBounds { index })
    }
}

/// Index wrapper that only ever answers with the query point itself, padded
/// with [`NO_NEIGHBOUR`], and counts how many queries it served.
///
/// Forces every spanning tree builder onto its global fallback path.
#[derive(Clone, Debug)]
pub(crate) struct SelfOnlyIndex<I> {
    inner: I,
    queries: Arc<AtomicUsize>,
}

impl<I> SelfOnlyIndex<I> {
    #[must_use]
    pub(crate) fn new(inner: I) -> Self {
        Self {
            inner,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    #[must_use]
    pub(crate) fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl<I: NearestNeighbourIndex> NearestNeighbourIndex for SelfOnlyIndex<I> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn find(&self, query: &[f32], limit: usize) -> Result<Vec<usize>, IndexError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let mut ids = self.inner.find(query, limit.min(1))?;
        ids.resize(limit, NO_NEIGHBOUR);
        Ok(ids)
    }

    fn insert(&mut self, vector: &[f32]) -> Result<usize, IndexError> {
        self.inner.insert(vector)
    }

    fn rebuild(&mut self, rows: Vec<Vec<f32>>) -> Result<(), IndexError> {
        self.inner.rebuild(rows)
    }
}

/// Index that answers every query with a fixed id list.
#[derive(Clone, Debug)]
pub(crate) struct FixedIndex {
    len: usize,
    answer: Vec<usize>,
}

impl FixedIndex {
    #[must_use]
    pub(crate) fn new(len: usize, answer: Vec<usize>) -> Self {
        Self { len, answer }
    }
}

impl NearestNeighbourIndex for FixedIndex {
    fn len(&self) -> usize {
        self.len
    }

    fn find(&self, _query: &[f32], limit: usize) -> Result<Vec<usize>, IndexError> {
        Ok(self.answer.iter().copied().take(limit).collect())
    }

    fn insert(&mut self, _vector: &[f32]) -> Result<usize, IndexError> {
        self.len += 1;
        Ok(self.len - 1)
    }

    fn rebuild(&mut self, rows: Vec<Vec<f32>>) -> Result<(), IndexError> {
        self.len = rows.len();
        Ok(())
    }
}

/// Reference connectivity count via a plain parent array.
#[must_use]
pub(crate) fn count_components(node_count: usize, pairs: &[(usize, usize)]) -> usize {
    let mut parent: Vec<usize> = (0..node_count).collect();

    fn find(parent: &mut [usize], node: usize) -> usize {
        let mut current = node;
        while parent[current] != current {
            let grandparent = parent[parent[current]];
            parent[current] = grandparent;
            current = parent[current];
        }
        current
    }

    for &(left, right) in pairs {
        let left_root = find(&mut parent, left);
        let right_root = find(&mut parent, right);
        if left_root != right_root {
            parent[right_root] = left_root;
        }
    }

    let mut roots = (0..node_count)
        .map(|node| find(&mut parent, node))
        .collect::<Vec<_>>();
    roots.sort_unstable();
    roots.dedup();
    roots.len()
}
