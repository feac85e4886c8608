//! Parquet inputs written on the fly for CLI tests.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use arrow_array::{ArrayRef, FixedSizeListArray, Float32Array, RecordBatch};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::arrow_writer::ArrowWriter;
use tempfile::TempDir;

/// Two tight triples on a line plus one far straggler.
pub(super) const TRIPLES: [[f32; 2]; 7] = [
    [0.0, 0.0],
    [0.1, 0.0],
    [0.2, 0.0],
    [10.0, 0.0],
    [10.1, 0.0],
    [10.2, 0.0],
    [100.0, 0.0],
];

/// Writes `rows` as a `features: FixedSizeList<Float32, 2>` column.
pub(super) fn create_parquet_file(
    dir: &TempDir,
    name: &str,
    rows: &[[f32; 2]],
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.path().join(name);
    let item_field = Arc::new(Field::new("item", DataType::Float32, false));
    let list_type = DataType::FixedSizeList(Arc::clone(&item_field), 2);
    let schema = Arc::new(Schema::new(vec![Field::new("features", list_type, false)]));

    let values = Float32Array::from(rows.iter().flatten().copied().collect::<Vec<_>>());
    let list = FixedSizeListArray::try_new(item_field, 2, Arc::new(values) as ArrayRef, None)?;
    let batch = RecordBatch::try_new(Arc::clone(&schema), vec![Arc::new(list) as ArrayRef])?;

    let file = File::create(&path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(path)
}
