//! Benchmark parameter types used as Criterion benchmark identifiers.

use std::fmt;

use strata_core::MstStrategy;

/// Parameters for a spanning tree or end-to-end benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct PipelineBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Spanning tree strategy under test.
    pub strategy: MstStrategy,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/n={}", self.strategy, self.point_count)
    }
}

/// Parameters for a hierarchy extraction benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct ExtractionBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Minimum cluster size used for condensation.
    pub min_cluster_size: usize,
}

impl fmt::Display for ExtractionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},min={}", self.point_count, self.min_cluster_size)
    }
}
