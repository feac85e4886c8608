//! Fixtures shared by the integration suites.

use strata_core::{DataSource, DataSourceError};

/// In-memory rows with an optional row that refuses to be read.
#[derive(Clone, Debug)]
pub struct Points {
    rows: Vec<Vec<f32>>,
    unreadable: Option<usize>,
}

impl Points {
    #[must_use]
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self {
            rows,
            unreadable: None,
        }
    }

    /// One-dimensional points at the given positions.
    #[must_use]
    pub fn line(positions: &[f32]) -> Self {
        Self::new(positions.iter().map(|&x| vec![x]).collect())
    }

    /// Makes reads of `row` fail with a dimension mismatch.
    #[must_use]
    pub fn with_unreadable(mut self, row: usize) -> Self {
        self.unreadable = Some(row);
        self
    }

    #[must_use]
    pub fn rows(&self) -> Vec<Vec<f32>> {
        self.rows.clone()
    }
}

impl DataSource for Points {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn name(&self) -> &str {
        "points"
    }

    fn vector(&self, index: usize) -> Result<&[f32], DataSourceError> {
        if self.unreadable == Some(index) {
            return Err(DataSourceError::DimensionMismatch { left: 1, right: 0 });
        }
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DataSourceError::OutOfBounds { index })
    }
}

/// Two tight triples and one distant straggler.
#[must_use]
pub fn two_triples() -> Points {
    Points::line(&[0.0, 0.1, 0.2, 10.0, 10.1, 10.2, 100.0])
}
