//! Error types for synthetic benchmark data generation.

/// Rejected generator configurations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SyntheticError {
    /// No points were requested.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// Vectors were requested with no dimensions.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// No blobs were requested.
    #[error("cluster count must be greater than zero")]
    ZeroClusters,
    /// More blobs than points were requested.
    #[error("cluster count ({cluster_count}) must not exceed point count ({point_count})")]
    ClusterCountExceedsPointCount {
        /// Requested blobs.
        cluster_count: usize,
        /// Requested points.
        point_count: usize,
    },
    /// The flat buffer length does not fit in `usize`.
    #[error("point_count * dimensions overflows usize")]
    Overflow,
    /// A float parameter was non-finite or out of range.
    #[error("invalid floating-point parameter `{parameter}`")]
    InvalidFloatParameter {
        /// Offending parameter.
        parameter: &'static str,
    },
    /// A per-axis scale was non-finite or not positive.
    #[error("anisotropy axis {index} must be finite and greater than zero")]
    InvalidAxisScale {
        /// Offending axis.
        index: usize,
    },
    /// The per-axis scale list has the wrong length.
    #[error("anisotropy axis scale length mismatch: expected {expected}, got {actual}")]
    AxisScaleLengthMismatch {
        /// Configured dimensions.
        expected: usize,
        /// Scales supplied.
        actual: usize,
    },
}
