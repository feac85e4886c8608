//! Strata core library.
//!
//! Density-based hierarchical clustering over an approximate
//! nearest-neighbour oracle: a concurrent Borůvka minimum spanning tree over
//! mutual-reachability distances, the dendrogram derived from it, HDBSCAN
//! condensation and stability-based flat cluster extraction.
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

mod builder;
mod datasource;
pub mod distance;
mod error;
mod hdbscan;
pub mod hierarchy;
pub mod index;
pub mod mst;
pub mod reachability;
mod result;
#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{HdbscanBuilder, MstStrategy},
    datasource::DataSource,
    distance::{DistanceError, DistanceMetric, Metric},
    error::{ClusteringError, ClusteringErrorCode, DataSourceError, DataSourceErrorCode, Result},
    hdbscan::{ClusteringRun, Hdbscan},
    hierarchy::{DendroNode, Dendrogram, DendrogramError, NodeId},
    index::{ExactIndex, IndexError, NO_NEIGHBOUR, NearestNeighbourIndex, Neighbour},
    mst::{
        BoruvkaMstBuilder, CheapestEdgeTable, Edge, MstConfig, MstError, MstStats,
        PrimMstBuilder, SpanningTree, UnionFind,
    },
    reachability::{DistanceCache, MutualReachability, ReachabilityError},
    result::{ClusterId, ClusteringResult, InvalidClusterLayout},
};
