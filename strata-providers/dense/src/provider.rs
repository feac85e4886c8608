//! Dense matrix provider implementation.

use std::{fs::File, path::Path};

use arrow_array::{FixedSizeListArray, RecordBatch, RecordBatchReader};
use parquet::{
    arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder},
    file::reader::ChunkReader,
};
use strata_core::{DataSource, DataSourceError};
use tracing::debug;

use crate::{
    errors::DenseMatrixProviderError,
    ingest::{MatrixBuffer, validate_fixed_size_list_field},
};

/// Dense matrix provider backed by a contiguous row-major buffer.
///
/// # Examples
/// ```
/// use strata_core::DataSource;
/// use strata_providers_dense::DenseMatrixProvider;
///
/// let provider = DenseMatrixProvider::try_from_rows("demo", vec![vec![0.0, 1.0], vec![2.0, 3.0]])?;
/// assert_eq!(provider.len(), 2);
/// assert_eq!(provider.vector(1)?, &[2.0, 3.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DenseMatrixProvider {
    name: String,
    rows: usize,
    dimension: usize,
    values: Vec<f32>,
}

impl DenseMatrixProvider {
    fn from_parts(name: impl Into<String>, rows: usize, dimension: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), rows.saturating_mul(dimension));
        Self {
            name: name.into(),
            rows,
            dimension,
            values,
        }
    }

    /// Copies in-memory rows into a provider.
    ///
    /// # Errors
    /// Returns [`DataSourceError::EmptyData`] for no rows,
    /// [`DataSourceError::ZeroDimension`] for empty rows and
    /// [`DataSourceError::DimensionMismatch`] when row lengths differ.
    pub fn try_from_rows(
        name: impl Into<String>,
        rows: Vec<Vec<f32>>,
    ) -> Result<Self, DataSourceError> {
        let Some(first) = rows.first() else {
            return Err(DataSourceError::EmptyData);
        };
        let dimension = first.len();
        if dimension == 0 {
            return Err(DataSourceError::ZeroDimension);
        }
        if let Some(row) = rows.iter().find(|row| row.len() != dimension) {
            return Err(DataSourceError::DimensionMismatch {
                left: dimension,
                right: row.len(),
            });
        }
        let count = rows.len();
        let values = rows.into_iter().flatten().collect();
        Ok(Self::from_parts(name, count, dimension, values))
    }

    /// Returns the dimensionality of each row.
    #[rustfmt::skip]
    #[must_use]
    pub fn dimension(&self) -> usize { self.dimension }

    /// Returns the underlying row-major matrix.
    #[rustfmt::skip]
    #[must_use]
    pub fn data(&self) -> &[f32] { &self.values }

    /// Copies the rows out, for building nearest-neighbour indices.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        if self.dimension == 0 {
            return Vec::new();
        }
        self.values
            .chunks_exact(self.dimension)
            .map(<[f32]>::to_vec)
            .collect()
    }

    /// Loads data from an Arrow [`FixedSizeListArray`].
    ///
    /// # Errors
    /// Returns a [`DenseMatrixProviderError`] for non-`Float32` items, null
    /// rows or values, and unusable widths.
    pub fn try_from_fixed_size_list(
        name: impl Into<String>,
        array: &FixedSizeListArray,
    ) -> Result<Self, DenseMatrixProviderError> {
        let mut buffer = MatrixBuffer::default();
        buffer.push_list(array)?;
        let (rows, dimension, values) = buffer.finish();
        Ok(Self::from_parts(name, rows, dimension, values))
    }

    /// Loads the `column` of every record batch.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::ColumnNotFound`] when a batch lacks
    /// the column, [`DenseMatrixProviderError::InconsistentBatchDimension`]
    /// when batch widths differ and the validation errors of
    /// [`Self::try_from_fixed_size_list`].
    pub fn try_from_record_batches<'a>(
        name: impl Into<String>,
        column: &str,
        batches: impl IntoIterator<Item = &'a RecordBatch>,
    ) -> Result<Self, DenseMatrixProviderError> {
        let mut buffer = MatrixBuffer::default();
        for batch in batches {
            buffer.push_batch(batch, column)?;
        }
        let (rows, dimension, values) = buffer.finish();
        Ok(Self::from_parts(name, rows, dimension, values))
    }

    /// Loads data from a Parquet column containing `FixedSizeList<Float32, D>`
    /// rows.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::Io`] when the file cannot be opened
    /// and the errors of [`Self::try_from_parquet_reader`].
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file, column)
    }

    /// Loads data from a Parquet reader, projecting only `column`.
    ///
    /// # Errors
    /// Returns [`DenseMatrixProviderError::Parquet`] or
    /// [`DenseMatrixProviderError::Arrow`] when decoding fails and the
    /// errors of [`Self::try_from_record_batches`].
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
        column: &str,
    ) -> Result<Self, DenseMatrixProviderError>
    where
        R: ChunkReader + Send + 'static,
    {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
        let mask = ProjectionMask::columns(builder.parquet_schema(), [column]);
        let reader = builder.with_projection(mask).build()?;
        let schema = reader.schema();
        let field = schema
            .field_with_name(column)
            .map_err(|_| DenseMatrixProviderError::ColumnNotFound {
                column: column.to_owned(),
            })?;
        validate_fixed_size_list_field(field, column)?;

        let mut buffer = MatrixBuffer::default();
        let mut batches = 0_usize;
        for batch in reader {
            buffer.push_batch(&batch?, column)?;
            batches += 1;
        }
        let (rows, dimension, values) = buffer.finish();
        debug!(column, batches, rows, dimension, "loaded parquet matrix");
        Ok(Self::from_parts(name, rows, dimension, values))
    }
}

impl DataSource for DenseMatrixProvider {
    fn len(&self) -> usize {
        self.rows
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn vector(&self, index: usize) -> Result<&[f32], DataSourceError> {
        if index >= self.rows {
            return Err(DataSourceError::OutOfBounds { index });
        }
        let start = index
            .checked_mul(self.dimension)
            .ok_or(DataSourceError::OutOfBounds { index })?;
        let end = start
            .checked_add(self.dimension)
            .ok_or(DataSourceError::OutOfBounds { index })?;
        self.values
            .get(start..end)
            .ok_or(DataSourceError::OutOfBounds { index })
    }

    fn dimension(&self) -> Result<Option<usize>, DataSourceError> {
        Ok((self.rows > 0).then_some(self.dimension))
    }
}
