//! Approximate minimum spanning tree construction over mutual-reachability
//! distances.
//!
//! Two builders share the same oracle and output types:
//!
//! - [`BoruvkaMstBuilder`] runs parallel Borůvka rounds. Workers search each
//!   vertex's nearest neighbours for the cheapest edge leaving its component,
//!   widening the search radius until a candidate appears, and a serial commit
//!   phase unions the winners. When a round commits nothing, a bounded global
//!   search forces one union so progress is guaranteed.
//! - [`PrimMstBuilder`] grows a single tree from a seeded random start using a
//!   binary heap of candidate edges.
//!
//! Both always return exactly `n - 1` edges for `n` points.

mod boruvka;
mod edge_table;
mod prim;
mod union_find;

use std::{cmp::Ordering, num::NonZeroUsize};

use thiserror::Error;

use crate::{error::DataSourceError, reachability::ReachabilityError};

pub use self::boruvka::BoruvkaMstBuilder;
pub use self::edge_table::CheapestEdgeTable;
pub use self::prim::PrimMstBuilder;
pub use self::union_find::UnionFind;
pub(crate) use self::union_find::Forest;

/// Errors returned while computing a spanning tree.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum MstError {
    /// The caller requested a spanning tree over no points.
    #[error("cannot compute a spanning tree over an empty point set")]
    EmptyGraph,
    /// An edge weight was NaN or negative.
    #[error("edge ({left}, {right}) has invalid weight {weight}")]
    InvalidEdgeWeight {
        /// One endpoint of the offending edge.
        left: usize,
        /// The other endpoint of the offending edge.
        right: usize,
        /// The rejected weight.
        weight: f64,
    },
    /// A synchronisation primitive became poisoned after a panic.
    #[error("lock for {resource} is poisoned")]
    LockPoisoned {
        /// Name of the locked resource that was poisoned.
        resource: &'static str,
    },
    /// The worker pool could not be created.
    #[error("failed to build worker pool: {reason}")]
    ThreadPool {
        /// Message reported by the pool builder.
        reason: String,
    },
    /// The mutual-reachability oracle failed.
    #[error(transparent)]
    Reachability {
        /// Underlying oracle error.
        #[from]
        error: ReachabilityError,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`MstError`].
    enum MstErrorCode for MstError {
        /// The caller requested a spanning tree over no points.
        EmptyGraph => EmptyGraph => "MST_EMPTY_GRAPH",
        /// An edge weight was NaN or negative.
        InvalidEdgeWeight => InvalidEdgeWeight { .. } => "MST_INVALID_EDGE_WEIGHT",
        /// A synchronisation primitive became poisoned after a panic.
        LockPoisoned => LockPoisoned { .. } => "MST_LOCK_POISONED",
        /// The worker pool could not be created.
        ThreadPool => ThreadPool { .. } => "MST_THREAD_POOL",
        /// The mutual-reachability oracle failed.
        Reachability => Reachability { .. } => "MST_REACHABILITY_FAILURE",
    }
}

impl MstError {
    /// Returns the originating [`DataSourceError`], if any.
    #[must_use]
    pub fn data_source_error(&self) -> Option<&DataSourceError> {
        match self {
            Self::Reachability {
                error: ReachabilityError::DataSource { error, .. },
            } => Some(error),
            _ => None,
        }
    }
}

/// An undirected weighted edge in canonical form (`source <= target`).
///
/// Edges order by weight (using [`f64::total_cmp`]), then by endpoint pair.
/// This total order is the tie-break used throughout spanning tree
/// construction.
///
/// # Examples
/// ```
/// use strata_core::Edge;
///
/// let edge = Edge::new(7, 3, 0.25)?;
/// assert_eq!((edge.source(), edge.target()), (3, 7));
/// assert!(Edge::new(0, 1, 0.25)? < edge);
/// assert!(Edge::new(0, 1, f64::NAN).is_err());
/// # Ok::<(), strata_core::MstError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    source: usize,
    target: usize,
    weight: f64,
}

impl Edge {
    /// Creates an edge, canonicalising the endpoint order.
    ///
    /// `+inf` is accepted; it arises from points with too few neighbours to
    /// define a core distance.
    ///
    /// # Errors
    /// Returns [`MstError::InvalidEdgeWeight`] when `weight` is NaN or
    /// negative.
    pub fn new(left: usize, right: usize, weight: f64) -> Result<Self, MstError> {
        if weight.is_nan() || weight < 0.0 {
            return Err(MstError::InvalidEdgeWeight {
                left,
                right,
                weight,
            });
        }
        let (source, target) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };
        Ok(Self {
            source,
            target,
            weight,
        })
    }

    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }

    /// Returns the endpoint opposite `node`, or `None` when `node` is not an
    /// endpoint.
    #[must_use]
    pub fn opposite(&self, node: usize) -> Option<usize> {
        if node == self.source {
            Some(self.target)
        } else if node == self.target {
            Some(self.source)
        } else {
            None
        }
    }
}

impl Eq for Edge {}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.target.cmp(&other.target))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Counters describing how a spanning tree was built.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MstStats {
    /// Borůvka rounds executed (zero for Prim).
    pub rounds: usize,
    /// Edges added by the global fallback search rather than the neighbour
    /// oracle.
    pub forced_unions: usize,
}

/// A spanning tree over `point_count` points.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanningTree {
    point_count: usize,
    edges: Vec<Edge>,
    stats: MstStats,
}

impl SpanningTree {
    pub(crate) fn new(point_count: usize, mut edges: Vec<Edge>, stats: MstStats) -> Self {
        edges.sort_unstable();
        Self {
            point_count,
            edges,
            stats,
        }
    }

    /// Returns the number of points spanned.
    #[must_use]
    #[rustfmt::skip]
    pub fn point_count(&self) -> usize { self.point_count }

    /// Returns the tree edges in ascending [`Edge`] order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns construction counters.
    #[must_use]
    #[rustfmt::skip]
    pub fn stats(&self) -> MstStats { self.stats }

    /// Returns the sum of the edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(Edge::weight).sum()
    }
}

/// Parameters shared by the spanning tree builders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MstConfig {
    min_neighbours: NonZeroUsize,
    workers: NonZeroUsize,
    fallback_candidate_limit: NonZeroUsize,
    seed: u64,
}

impl MstConfig {
    /// Default number of candidates examined by the global fallback search.
    pub const DEFAULT_FALLBACK_CANDIDATE_LIMIT: NonZeroUsize = match NonZeroUsize::new(4096) {
        Some(limit) => limit,
        None => NonZeroUsize::MIN,
    };

    /// Creates a configuration that starts neighbour searches at
    /// `min_neighbours` and runs on the default worker count.
    #[must_use]
    pub fn new(min_neighbours: NonZeroUsize) -> Self {
        Self {
            min_neighbours,
            workers: default_workers(),
            fallback_candidate_limit: Self::DEFAULT_FALLBACK_CANDIDATE_LIMIT,
            seed: 0,
        }
    }

    /// Overrides the worker pool size.
    #[must_use]
    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    /// Overrides the number of candidates the fallback search examines.
    #[must_use]
    pub fn with_fallback_candidate_limit(mut self, limit: NonZeroUsize) -> Self {
        self.fallback_candidate_limit = limit;
        self
    }

    /// Overrides the seed used to pick Prim's starting vertex.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Initial neighbour search width.
    #[must_use]
    #[rustfmt::skip]
    pub fn min_neighbours(&self) -> NonZeroUsize { self.min_neighbours }

    /// Worker pool size.
    #[must_use]
    #[rustfmt::skip]
    pub fn workers(&self) -> NonZeroUsize { self.workers }

    /// Fallback search bound.
    #[must_use]
    #[rustfmt::skip]
    pub fn fallback_candidate_limit(&self) -> NonZeroUsize { self.fallback_candidate_limit }

    /// Seed for randomised start vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> u64 { self.seed }
}

/// Default worker count: available parallelism minus two, at least one.
#[must_use]
pub fn default_workers() -> NonZeroUsize {
    std::thread::available_parallelism()
        .ok()
        .and_then(|cores| NonZeroUsize::new(cores.get().saturating_sub(2)))
        .unwrap_or(NonZeroUsize::MIN)
}


#[cfg(test)]
mod property;
