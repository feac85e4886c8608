//! Benchmark setup error type.
//!
//! Setup code propagates every fallible preparation step with `?`; only the
//! Criterion entry points turn an error into a panic.

use strata_core::{ClusteringError, DataSourceError, DendrogramError, MstError};

use crate::source::SyntheticError;

/// Errors that may occur while preparing a benchmark.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Copying the source into an index failed.
    #[error("data source error: {0}")]
    DataSource(#[from] DataSourceError),
    /// Spanning tree construction failed.
    #[error("spanning tree construction failed: {0}")]
    Mst(#[from] MstError),
    /// Building the dendrogram failed.
    #[error("dendrogram construction failed: {0}")]
    Dendrogram(#[from] DendrogramError),
    /// Configuring or running the clusterer failed.
    #[error("clustering failed: {0}")]
    Clustering(#[from] ClusteringError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was zero.
        context: &'static str,
    },
}
