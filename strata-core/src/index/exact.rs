//! Flat, exhaustive nearest-neighbour index.

use std::{collections::BinaryHeap, sync::Arc};

use crate::{
    datasource::DataSource,
    distance::DistanceMetric,
    error::DataSourceError,
};

use super::{IndexError, NearestNeighbourIndex, Neighbour};

/// Exhaustive index that compares the query against every stored row.
///
/// Storage sits behind an [`Arc`], so clones handed to worker chunks share the
/// rows; [`NearestNeighbourIndex::insert`] and
/// [`NearestNeighbourIndex::rebuild`] copy on write.
///
/// # Examples
/// ```
/// use strata_core::{ExactIndex, Metric, NearestNeighbourIndex};
///
/// let mut index = ExactIndex::new(vec![vec![0.0, 0.0]], Metric::Euclidean)?;
/// let id = index.insert(&[3.0, 4.0])?;
/// assert_eq!(id, 1);
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.find(&[2.9, 4.1], 1)?, vec![1]);
/// # Ok::<(), strata_core::IndexError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ExactIndex<M> {
    rows: Arc<Vec<Vec<f32>>>,
    metric: M,
}

impl<M: DistanceMetric + Clone> ExactIndex<M> {
    /// Builds an index over `rows`.
    ///
    /// # Errors
    /// Returns [`IndexError::DimensionMismatch`] when rows differ in length.
    pub fn new(rows: Vec<Vec<f32>>, metric: M) -> Result<Self, IndexError> {
        validate_rows(&rows)?;
        Ok(Self {
            rows: Arc::new(rows),
            metric,
        })
    }

    /// Copies every vector of `source` into a new index.
    ///
    /// # Errors
    /// Propagates [`DataSourceError`]s raised while reading rows and returns
    /// [`DataSourceError::DimensionMismatch`] when rows differ in length.
    pub fn from_source<D: DataSource + ?Sized>(
        source: &D,
        metric: M,
    ) -> Result<Self, DataSourceError> {
        let rows = (0..source.len())
            .map(|index| source.vector(index).map(<[f32]>::to_vec))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some((left, right)) = ragged_row(&rows) {
            return Err(DataSourceError::DimensionMismatch { left, right });
        }
        Ok(Self {
            rows: Arc::new(rows),
            metric,
        })
    }

    /// Returns the metric used to rank neighbours.
    #[rustfmt::skip]
    #[must_use]
    pub fn metric(&self) -> &M { &self.metric }

    /// Returns the dimensionality of the stored rows, if any are stored.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.rows.first().map(Vec::len)
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<(), IndexError> {
        match self.dimension() {
            Some(expected) if expected != vector.len() => Err(IndexError::DimensionMismatch {
                expected,
                got: vector.len(),
            }),
            _ => Ok(()),
        }
    }
}

impl<M: DistanceMetric + Clone> NearestNeighbourIndex for ExactIndex<M> {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn find(&self, query: &[f32], limit: usize) -> Result<Vec<usize>, IndexError> {
        if limit == 0 || self.rows.is_empty() {
            return Ok(Vec::new());
        }
        self.check_dimension(query)?;

        // Max-heap on distance retaining the `limit` closest rows.
        let mut best = BinaryHeap::with_capacity(limit.saturating_add(1));
        for (id, row) in self.rows.iter().enumerate() {
            let distance = self
                .metric
                .distance(query, row)
                .map_err(|error| IndexError::Distance { id, error })?;
            best.push(Neighbour { id, distance });
            if best.len() > limit {
                best.pop();
            }
        }

        Ok(best
            .into_sorted_vec()
            .into_iter()
            .map(|neighbour| neighbour.id)
            .collect())
    }

    fn insert(&mut self, vector: &[f32]) -> Result<usize, IndexError> {
        self.check_dimension(vector)?;
        let rows = Arc::make_mut(&mut self.rows);
        rows.push(vector.to_vec());
        Ok(rows.len() - 1)
    }

    fn rebuild(&mut self, rows: Vec<Vec<f32>>) -> Result<(), IndexError> {
        validate_rows(&rows)?;
        self.rows = Arc::new(rows);
        Ok(())
    }
}

fn validate_rows(rows: &[Vec<f32>]) -> Result<(), IndexError> {
    match ragged_row(rows) {
        Some((expected, got)) => Err(IndexError::DimensionMismatch { expected, got }),
        None => Ok(()),
    }
}

/// Returns `(expected, got)` for the first row whose length differs from the
/// first row's.
fn ragged_row(rows: &[Vec<f32>]) -> Option<(usize, usize)> {
    let (first, rest) = rows.split_first()?;
    let expected = first.len();
    rest.iter()
        .find(|row| row.len() != expected)
        .map(|row| (expected, row.len()))
}
