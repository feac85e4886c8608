//! Dense `f32` vector sources backed by contiguous row-major storage.
//!
//! [`DenseMatrixProvider`] loads `FixedSizeList<Float32, D>` columns from
//! Arrow arrays, record batches or Parquet files, or wraps in-memory rows,
//! and serves them to `strata-core` through the `DataSource` trait.

mod errors;
mod ingest;
mod provider;

pub use errors::DenseMatrixProviderError;
pub use provider::DenseMatrixProvider;

#[cfg(test)]
mod tests;
