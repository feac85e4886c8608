//! Helpers for ingesting fixed-size list arrays into dense buffers.

use arrow_array::{Array, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field};

use crate::errors::DenseMatrixProviderError;

/// Accumulates fixed-size list arrays into one row-major buffer, checking
/// that every array shares the first array's width.
#[derive(Debug, Default)]
pub(crate) struct MatrixBuffer {
    rows: usize,
    dimension: Option<usize>,
    values: Vec<f32>,
}

impl MatrixBuffer {
    /// Appends the `column` of `batch`.
    pub(crate) fn push_batch(
        &mut self,
        batch: &RecordBatch,
        column: &str,
    ) -> Result<(), DenseMatrixProviderError> {
        let schema = batch.schema();
        let index = schema
            .index_of(column)
            .map_err(|_| DenseMatrixProviderError::ColumnNotFound {
                column: column.to_owned(),
            })?;
        validate_fixed_size_list_field(schema.field(index), column)?;
        let array = batch.column(index);
        let list = array
            .as_any()
            .downcast_ref::<FixedSizeListArray>()
            .ok_or_else(|| DenseMatrixProviderError::InvalidColumnType {
                column: column.to_owned(),
                actual: array.data_type().clone(),
            })?;
        self.push_list(list)
    }

    /// Appends every row of `list`.
    pub(crate) fn push_list(
        &mut self,
        list: &FixedSizeListArray,
    ) -> Result<(), DenseMatrixProviderError> {
        let dimension = validate_fixed_size_list(list)?;
        if let Some(expected) = self.dimension.filter(|&expected| expected != dimension) {
            return Err(DenseMatrixProviderError::InconsistentBatchDimension {
                expected,
                actual: dimension,
            });
        }
        copy_list_values(list, dimension, self.rows, &mut self.values)?;
        self.dimension = Some(dimension);
        self.rows += list.len();
        Ok(())
    }

    /// Row count, dimension (zero when nothing was pushed) and values.
    pub(crate) fn finish(self) -> (usize, usize, Vec<f32>) {
        (self.rows, self.dimension.unwrap_or(0), self.values)
    }
}

pub(crate) fn validate_fixed_size_list_field(
    field: &Field,
    column: &str,
) -> Result<usize, DenseMatrixProviderError> {
    let DataType::FixedSizeList(child, width) = field.data_type() else {
        return Err(DenseMatrixProviderError::InvalidColumnType {
            column: column.to_owned(),
            actual: field.data_type().clone(),
        });
    };
    if field.is_nullable() || child.is_nullable() {
        return Err(DenseMatrixProviderError::NullableField {
            column: column.to_owned(),
            nullable_child: child.is_nullable(),
        });
    }
    if child.data_type() != &DataType::Float32 {
        return Err(DenseMatrixProviderError::InvalidListValueType {
            actual: child.data_type().clone(),
        });
    }
    usize::try_from(*width).map_err(|_| DenseMatrixProviderError::InvalidDimension { actual: *width })
}

pub(crate) fn validate_fixed_size_list(
    array: &FixedSizeListArray,
) -> Result<usize, DenseMatrixProviderError> {
    let value_type = array.value_type();
    if value_type != DataType::Float32 {
        return Err(DenseMatrixProviderError::InvalidListValueType { actual: value_type });
    }
    usize::try_from(array.value_length()).map_err(|_| DenseMatrixProviderError::InvalidDimension {
        actual: array.value_length(),
    })
}

pub(crate) fn copy_list_values(
    array: &FixedSizeListArray,
    dimension: usize,
    start_row: usize,
    out: &mut Vec<f32>,
) -> Result<(), DenseMatrixProviderError> {
    let rows = array.len();
    let additional = rows
        .checked_mul(dimension)
        .ok_or(DenseMatrixProviderError::CapacityOverflow { rows, dimension })?;
    out.reserve(additional);
    for offset in 0..rows {
        let row = start_row + offset;
        if array.is_null(offset) {
            return Err(DenseMatrixProviderError::NullRow { row });
        }
        let values = array.value(offset);
        let floats = values
            .as_any()
            .downcast_ref::<Float32Array>()
            .ok_or_else(|| DenseMatrixProviderError::InvalidListValueType {
                actual: values.data_type().clone(),
            })?;
        if floats.len() != dimension {
            return Err(DenseMatrixProviderError::InvalidRowLength {
                row,
                expected: dimension,
                actual: floats.len(),
            });
        }
        if let Some(value_index) = (0..dimension).find(|&index| floats.is_null(index)) {
            return Err(DenseMatrixProviderError::NullValue { row, value_index });
        }
        out.extend_from_slice(floats.values());
    }
    Ok(())
}
