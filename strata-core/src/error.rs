//! Error types for the Strata core library.
//!
//! Defines the error enums exposed by the clustering API and a convenient
//! result alias. Lower layers (distances, the nearest-neighbour index, the
//! spanning tree builders and the dendrogram) own their own error types and
//! are wrapped here with the name of the data source being clustered.

use std::sync::Arc;

use thiserror::Error;

use crate::{hierarchy::DendrogramError, mst::MstError};

/// An error produced by [`crate::DataSource`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DataSourceError {
    /// Requested index was outside the source's bounds.
    #[error("index {index} is out of bounds")]
    OutOfBounds {
        /// The requested row that exceeded the source bounds.
        index: usize,
    },
    /// Rows had different dimensions.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand vector.
        left: usize,
        /// Dimensionality of the right-hand vector.
        right: usize,
    },
    /// Data source contained no rows.
    #[error("data source contains no rows")]
    EmptyData,
    /// Data source rows must have positive dimension.
    #[error("data source vectors must have positive dimension")]
    ZeroDimension,
}

define_error_codes! {
    /// Stable codes describing [`DataSourceError`] variants.
    enum DataSourceErrorCode for DataSourceError {
        /// Requested index was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "DATA_SOURCE_OUT_OF_BOUNDS",
        /// Rows had different dimensions.
        DimensionMismatch => DimensionMismatch { .. } => "DATA_SOURCE_DIMENSION_MISMATCH",
        /// Data source contained no rows.
        EmptyData => EmptyData => "DATA_SOURCE_EMPTY",
        /// Data source rows must have positive dimension.
        ZeroDimension => ZeroDimension => "DATA_SOURCE_ZERO_DIMENSION",
    }
}

/// Error type produced when configuring or running [`crate::Hdbscan`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClusteringError {
    /// Minimum cluster size must be greater than zero.
    #[error("min_cluster_size must be at least 1 (got {got})")]
    InvalidMinClusterSize {
        /// The invalid minimum cluster size supplied by the caller.
        got: usize,
    },
    /// Neighbour count used for core distances must be greater than zero.
    #[error("min_neighbours must be at least 1 (got {got})")]
    InvalidMinNeighbours {
        /// The invalid neighbour count supplied by the caller.
        got: usize,
    },
    /// The worker pool must contain at least one thread.
    #[error("max_workers must be at least 1 (got {got})")]
    InvalidWorkerCount {
        /// The invalid worker count supplied by the caller.
        got: usize,
    },
    /// The fallback search must consider at least one candidate.
    #[error("fallback_candidate_limit must be at least 1 (got {got})")]
    InvalidFallbackLimit {
        /// The invalid candidate limit supplied by the caller.
        got: usize,
    },
    /// The supplied [`crate::DataSource`] contained no items.
    #[error("data source `{data_source}` contains no items")]
    EmptySource {
        /// Identifier for the empty data source.
        data_source: Arc<str>,
    },
    /// The nearest-neighbour index does not cover the same points as the
    /// data source.
    #[error("data source `{data_source}` has {items} items but the index holds {indexed}")]
    IndexLengthMismatch {
        /// Identifier for the data source being clustered.
        data_source: Arc<str>,
        /// Number of items available in the data source.
        items: usize,
        /// Number of vectors held by the index.
        indexed: usize,
    },
    /// Building the spanning tree failed.
    #[error("spanning tree construction over `{data_source}` failed: {error}")]
    Mst {
        /// Identifier for the data source being clustered.
        data_source: Arc<str>,
        #[source]
        /// Underlying spanning tree error.
        error: MstError,
    },
    /// The spanning tree could not be turned into a dendrogram.
    #[error("dendrogram construction over `{data_source}` failed: {error}")]
    Dendrogram {
        /// Identifier for the data source being clustered.
        data_source: Arc<str>,
        #[source]
        /// Underlying dendrogram error.
        error: DendrogramError,
    },
}

define_error_codes! {
    /// Stable codes describing [`ClusteringError`] variants.
    enum ClusteringErrorCode for ClusteringError {
        /// Minimum cluster size must be greater than zero.
        InvalidMinClusterSize => InvalidMinClusterSize { .. } => "STRATA_INVALID_MIN_CLUSTER_SIZE",
        /// Neighbour count must be greater than zero.
        InvalidMinNeighbours => InvalidMinNeighbours { .. } => "STRATA_INVALID_MIN_NEIGHBOURS",
        /// Worker count must be greater than zero.
        InvalidWorkerCount => InvalidWorkerCount { .. } => "STRATA_INVALID_WORKER_COUNT",
        /// Fallback candidate limit must be greater than zero.
        InvalidFallbackLimit => InvalidFallbackLimit { .. } => "STRATA_INVALID_FALLBACK_LIMIT",
        /// The supplied [`crate::DataSource`] contained no items.
        EmptySource => EmptySource { .. } => "STRATA_EMPTY_SOURCE",
        /// The index and the data source disagree on the number of points.
        IndexLengthMismatch => IndexLengthMismatch { .. } => "STRATA_INDEX_LENGTH_MISMATCH",
        /// Spanning tree construction failed.
        MstFailure => Mst { .. } => "STRATA_MST_FAILURE",
        /// Dendrogram construction failed.
        DendrogramFailure => Dendrogram { .. } => "STRATA_DENDROGRAM_FAILURE",
    }
}

impl ClusteringError {
    /// Retrieve the inner [`DataSourceErrorCode`] when the error originated in
    /// a [`crate::DataSource`].
    #[must_use]
    pub fn data_source_code(&self) -> Option<DataSourceErrorCode> {
        match self {
            Self::Mst { error, .. } => error.data_source_error().map(DataSourceError::code),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ClusteringError>;
