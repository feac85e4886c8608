//! Errors raised while loading dense matrices.

use arrow_schema::{ArrowError, DataType};
use thiserror::Error;

/// Failure loading or validating a dense matrix.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DenseMatrixProviderError {
    /// The requested column is absent from the schema.
    #[error("column `{column}` not found in Parquet schema")]
    ColumnNotFound {
        /// Requested column name.
        column: String,
    },
    /// The column is not a fixed-size list.
    #[error("column `{column}` must be a FixedSizeList<Float32, _> but found {actual:?}")]
    InvalidColumnType {
        /// Requested column name.
        column: String,
        /// Type found in the schema.
        actual: DataType,
    },
    /// The list or its items are declared nullable.
    #[error("column `{column}` must not be nullable (nullable child: {nullable_child})")]
    NullableField {
        /// Requested column name.
        column: String,
        /// Whether the list items, rather than the list itself, are nullable.
        nullable_child: bool,
    },
    /// List items are not `Float32`.
    #[error("FixedSizeList child type must be Float32 but found {actual:?}")]
    InvalidListValueType {
        /// Item type found.
        actual: DataType,
    },
    /// The declared list width is not a usable dimension.
    #[error("invalid FixedSizeList dimension {actual}")]
    InvalidDimension {
        /// Declared width.
        actual: i32,
    },
    /// A row is null.
    #[error("row {row} is null")]
    NullRow {
        /// Absolute row index.
        row: usize,
    },
    /// A row holds a null value.
    #[error("row {row} contains null value at position {value_index}")]
    NullValue {
        /// Absolute row index.
        row: usize,
        /// Position of the first null inside the row.
        value_index: usize,
    },
    /// A row's length disagrees with the matrix dimension.
    #[error("row {row} has length {actual} but expected {expected}")]
    InvalidRowLength {
        /// Absolute row index.
        row: usize,
        /// Matrix dimension.
        expected: usize,
        /// Row length found.
        actual: usize,
    },
    /// The matrix does not fit in memory addressing limits.
    #[error("matrix with {rows} rows and dimension {dimension} exceeds capacity limits")]
    CapacityOverflow {
        /// Row count.
        rows: usize,
        /// Row dimension.
        dimension: usize,
    },
    /// Record batches disagree on the list width.
    #[error("inconsistent dimensions across batches: expected {expected}, got {actual}")]
    InconsistentBatchDimension {
        /// Width of the first batch.
        expected: usize,
        /// Width of the offending batch.
        actual: usize,
    },
    /// Arrow rejected an operation.
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// Parquet decoding failed.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// The input file could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
