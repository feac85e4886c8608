//! Data source abstractions for the Strata core runtime.

use crate::error::DataSourceError;

/// Abstraction over a collection of dense vectors addressed by row index.
///
/// # Examples
/// ```
/// use strata_core::{DataSource, DataSourceError};
///
/// struct Rows(Vec<Vec<f32>>);
///
/// impl DataSource for Rows {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "rows" }
///     fn vector(&self, index: usize) -> Result<&[f32], DataSourceError> {
///         self.0
///             .get(index)
///             .map(Vec::as_slice)
///             .ok_or(DataSourceError::OutOfBounds { index })
///     }
/// }
///
/// let src = Rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
/// assert_eq!(src.len(), 2);
/// assert_eq!(src.name(), "rows");
/// assert_eq!(src.vector(1)?, &[3.0, 4.0]);
/// assert_eq!(src.dimension()?, Some(2));
/// # Ok::<(), DataSourceError>(())
/// ```
pub trait DataSource {
    /// Returns number of items in the source.
    fn len(&self) -> usize;

    /// Returns whether the source contains no items.
    ///
    /// # Examples
    /// ```
    /// use strata_core::{DataSource, DataSourceError};
    /// struct Empty;
    /// impl DataSource for Empty {
    ///     fn len(&self) -> usize { 0 }
    ///     fn name(&self) -> &str { "empty" }
    ///     fn vector(&self, index: usize) -> Result<&[f32], DataSourceError> {
    ///         Err(DataSourceError::OutOfBounds { index })
    ///     }
    /// }
    /// assert!(Empty.is_empty());
    /// ```
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Borrows the vector stored at `index`.
    ///
    /// # Errors
    /// Implementations must return [`DataSourceError::OutOfBounds`] for
    /// indices at or beyond [`DataSource::len`].
    fn vector(&self, index: usize) -> Result<&[f32], DataSourceError>;

    /// Returns the dimensionality of the stored vectors, or `None` when the
    /// source is empty.
    ///
    /// The default implementation inspects the first row.
    ///
    /// # Errors
    /// Propagates any [`DataSourceError`] surfaced by [`DataSource::vector`].
    fn dimension(&self) -> Result<Option<usize>, DataSourceError> {
        if self.is_empty() {
            return Ok(None);
        }
        self.vector(0).map(|row| Some(row.len()))
    }
}
