//! Nearest-neighbour oracle abstraction.
//!
//! The clustering engine never inspects how neighbours are found; it only
//! asks an index for the ids of the `limit` points closest to a query vector.
//! Approximate indexes may return fewer ids than requested or pad their
//! answer with [`NO_NEIGHBOUR`]; callers drop the sentinel and tolerate short
//! answers.
//!
//! [`ExactIndex`] is the reference implementation: a flat scan that returns
//! the true nearest neighbours.

mod exact;
mod types;

use thiserror::Error;

use crate::distance::DistanceError;

pub use self::exact::ExactIndex;
pub use self::types::Neighbour;

/// Sentinel id an index may emit for an empty result slot.
pub const NO_NEIGHBOUR: usize = usize::MAX;

/// Errors surfaced by a [`NearestNeighbourIndex`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum IndexError {
    /// The query or an inserted vector did not match the indexed dimension.
    #[error("vector has dimension {got} but the index holds dimension {expected}")]
    DimensionMismatch {
        /// Dimension of the indexed vectors.
        expected: usize,
        /// Dimension of the offending vector.
        got: usize,
    },
    /// Comparing the query with an indexed vector failed.
    #[error("distance to indexed vector {id} failed: {error}")]
    Distance {
        /// Indexed vector that could not be compared.
        id: usize,
        #[source]
        /// Underlying distance error.
        error: DistanceError,
    },
    /// The index implementation failed for another reason.
    #[error("index backend failed: {message}")]
    Backend {
        /// Description supplied by the backend.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`IndexError`] variants.
    enum IndexErrorCode for IndexError {
        /// Dimension disagreement between a vector and the index.
        DimensionMismatch => DimensionMismatch { .. } => "INDEX_DIMENSION_MISMATCH",
        /// Distance computation failed during a query.
        Distance => Distance { .. } => "INDEX_DISTANCE_FAILURE",
        /// Backend-specific failure.
        Backend => Backend { .. } => "INDEX_BACKEND_FAILURE",
    }
}

/// A nearest-neighbour oracle over the points being clustered.
///
/// Ids returned by [`NearestNeighbourIndex::find`] are row indices into the
/// same [`crate::DataSource`] the index was built from, ordered by increasing
/// distance from the query. An index built from a source returns the query
/// point itself when the query is one of its rows.
///
/// Implementations are cloned once per worker chunk during spanning tree
/// construction, so cloning should be cheap (share storage behind an `Arc`).
///
/// # Examples
/// ```
/// use strata_core::{ExactIndex, Metric, NearestNeighbourIndex};
///
/// let index = ExactIndex::new(
///     vec![vec![0.0], vec![1.0], vec![5.0]],
///     Metric::Euclidean,
/// )?;
/// assert_eq!(index.find(&[0.9], 2)?, vec![1, 0]);
/// # Ok::<(), strata_core::IndexError>(())
/// ```
pub trait NearestNeighbourIndex: Clone + Send + Sync {
    /// Number of indexed vectors.
    fn len(&self) -> usize;

    /// Returns whether the index holds no vectors.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns up to `limit` ids nearest to `query`, closest first.
    ///
    /// # Errors
    /// Returns an [`IndexError`] when the query cannot be answered.
    fn find(&self, query: &[f32], limit: usize) -> Result<Vec<usize>, IndexError>;

    /// Adds a vector and returns its id.
    ///
    /// # Errors
    /// Returns an [`IndexError`] when the vector is incompatible with the
    /// index.
    fn insert(&mut self, vector: &[f32]) -> Result<usize, IndexError>;

    /// Replaces the indexed contents with `rows`.
    ///
    /// # Errors
    /// Returns an [`IndexError`] when the rows are inconsistent.
    fn rebuild(&mut self, rows: Vec<Vec<f32>>) -> Result<(), IndexError>;
}
