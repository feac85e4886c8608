//! Dendrogram construction, condensation and flat cluster extraction.
//!
//! The spanning tree over mutual-reachability distances encodes the same
//! single-linkage hierarchy as the complete graph. Folding its edges in
//! ascending order through a disjoint set yields a binary merge tree: one leaf
//! per point and one internal node per merge, all stored in an arena and
//! addressed by [`NodeId`].
//!
//! [`Dendrogram::condense`] then prunes the tree HDBSCAN-style: branches below
//! `min_cluster_size` are absorbed into their parent, and a node left with a
//! single surviving branch continues as that branch. Stability is scored as
//! excess of mass in `λ = 1 / distance`. [`Dendrogram::extract_clusters`]
//! selects the most stable antichain of condensed nodes.
//!
//! Every traversal uses an explicit stack, so deep chains cannot overflow the
//! call stack.

mod condense;
mod extract;
mod union_find;

use std::fmt;

use thiserror::Error;

use crate::mst::Edge;

use self::union_find::DisjointSet;

/// Errors raised while building or querying a [`Dendrogram`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum DendrogramError {
    /// A dendrogram needs at least one point.
    #[error("cannot build a dendrogram over zero points")]
    Empty,
    /// An edge referenced a point outside the point set.
    #[error("edge ({left}, {right}) references a point outside 0..{point_count}")]
    InvalidEndpoint {
        /// Smaller endpoint of the offending edge.
        left: usize,
        /// Larger endpoint of the offending edge.
        right: usize,
        /// Number of points in the dendrogram.
        point_count: usize,
    },
    /// An edge joined two points that were already in the same cluster.
    #[error("edge ({left}, {right}) closes a cycle")]
    CyclicEdge {
        /// Smaller endpoint of the offending edge.
        left: usize,
        /// Larger endpoint of the offending edge.
        right: usize,
    },
    /// The edges left more than one root.
    #[error("edges leave {roots} disconnected components over {point_count} points")]
    Disconnected {
        /// Number of roots remaining after every edge was merged.
        roots: usize,
        /// Number of points in the dendrogram.
        point_count: usize,
    },
    /// A [`NodeId`] did not address a node in this dendrogram.
    #[error("node {id} is not part of a dendrogram with {len} nodes")]
    InvalidNodeId {
        /// The rejected handle.
        id: NodeId,
        /// Arena size.
        len: usize,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`DendrogramError`].
    enum DendrogramErrorCode for DendrogramError {
        /// A dendrogram needs at least one point.
        Empty => Empty => "DENDROGRAM_EMPTY",
        /// An edge referenced a point outside the point set.
        InvalidEndpoint => InvalidEndpoint { .. } => "DENDROGRAM_INVALID_ENDPOINT",
        /// An edge closed a cycle.
        CyclicEdge => CyclicEdge { .. } => "DENDROGRAM_CYCLIC_EDGE",
        /// The edges left more than one root.
        Disconnected => Disconnected { .. } => "DENDROGRAM_DISCONNECTED",
        /// A node handle was out of range.
        InvalidNodeId => InvalidNodeId { .. } => "DENDROGRAM_INVALID_NODE_ID",
    }
}

/// Handle addressing a node in a [`Dendrogram`] arena.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena slot this handle addresses.
    #[rustfmt::skip]
    #[must_use]
    pub fn index(self) -> usize { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A leaf (single point) or a merge event in the dendrogram.
#[derive(Clone, Debug, PartialEq)]
pub struct DendroNode {
    points: Vec<usize>,
    children: Option<Vec<NodeId>>,
    parent: Option<NodeId>,
    merge_distance: Option<f64>,
    stability: f64,
}

impl DendroNode {
    fn leaf(point: usize) -> Self {
        Self {
            points: vec![point],
            children: None,
            parent: None,
            merge_distance: None,
            stability: 0.0,
        }
    }

    /// Sorted indices of every point below this node.
    #[rustfmt::skip]
    #[must_use]
    pub fn points(&self) -> &[usize] { &self.points }

    /// Child handles, or `None` for a leaf.
    #[must_use]
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    /// Parent handle, or `None` for the root and for detached nodes.
    #[rustfmt::skip]
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> { self.parent }

    /// Distance at which this node's children merged, or `None` for a leaf.
    #[rustfmt::skip]
    #[must_use]
    pub fn merge_distance(&self) -> Option<f64> { self.merge_distance }

    /// Stability score accumulated during condensation.
    #[rustfmt::skip]
    #[must_use]
    pub fn stability(&self) -> f64 { self.stability }

    /// Returns whether this node was created for a single point.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of points below this node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; every node covers at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Arena-backed merge tree over a spanning tree's edges.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use strata_core::{Dendrogram, Edge};
///
/// let edges = [
///     Edge::new(0, 1, 0.1)?,
///     Edge::new(1, 2, 0.1)?,
///     Edge::new(3, 4, 0.1)?,
///     Edge::new(4, 5, 0.1)?,
///     Edge::new(2, 3, 5.0)?,
/// ];
/// let mut dendrogram = Dendrogram::from_mst(6, &edges)?;
/// assert_eq!(dendrogram.root_node().points(), &[0, 1, 2, 3, 4, 5]);
///
/// dendrogram.condense(NonZeroUsize::new(2).expect("non-zero"));
/// let clusters: Vec<Vec<usize>> = dendrogram
///     .extract_clusters()
///     .into_iter()
///     .map(|id| dendrogram.node(id).map(|node| node.points().to_vec()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(clusters, vec![vec![0, 1, 2], vec![3, 4, 5]]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Dendrogram {
    nodes: Vec<DendroNode>,
    root: NodeId,
    point_count: usize,
    condensed: bool,
}

impl Dendrogram {
    /// Builds the merge tree for `point_count` points from spanning tree
    /// edges, in any order.
    ///
    /// # Errors
    /// Returns [`DendrogramError::Empty`] for zero points,
    /// [`DendrogramError::InvalidEndpoint`] for out-of-range endpoints,
    /// [`DendrogramError::CyclicEdge`] when an edge joins an existing cluster
    /// to itself and [`DendrogramError::Disconnected`] when the edges do not
    /// connect every point.
    pub fn from_mst(point_count: usize, edges: &[Edge]) -> Result<Self, DendrogramError> {
        if point_count == 0 {
            return Err(DendrogramError::Empty);
        }
        if let Some(edge) = edges.iter().find(|edge| edge.target() >= point_count) {
            return Err(DendrogramError::InvalidEndpoint {
                left: edge.source(),
                right: edge.target(),
                point_count,
            });
        }

        let mut sorted = edges.to_vec();
        sorted.sort_unstable();

        let mut nodes: Vec<DendroNode> = Vec::with_capacity(2 * point_count - 1);
        nodes.extend((0..point_count).map(DendroNode::leaf));
        let mut dsu = DisjointSet::new(point_count);

        for edge in sorted {
            let left_root = dsu.find(edge.source());
            let right_root = dsu.find(edge.target());
            if left_root == right_root {
                return Err(DendrogramError::CyclicEdge {
                    left: edge.source(),
                    right: edge.target(),
                });
            }
            let left = dsu.component_node[left_root];
            let right = dsu.component_node[right_root];
            let id = nodes.len();
            let points = merge_sorted(&nodes[left].points, &nodes[right].points);
            nodes[left].parent = Some(NodeId(id));
            nodes[right].parent = Some(NodeId(id));
            nodes.push(DendroNode {
                points,
                children: Some(vec![NodeId(left), NodeId(right)]),
                parent: None,
                merge_distance: Some(edge.weight()),
                stability: 0.0,
            });
            let merged = dsu.union_roots(left_root, right_root);
            dsu.component_node[merged] = id;
        }

        let merges = nodes.len() - point_count;
        if merges + 1 != point_count {
            return Err(DendrogramError::Disconnected {
                roots: point_count - merges,
                point_count,
            });
        }

        Ok(Self {
            root: NodeId(nodes.len() - 1),
            nodes,
            point_count,
            condensed: false,
        })
    }

    /// Handle of the root node.
    #[rustfmt::skip]
    #[must_use]
    pub fn root(&self) -> NodeId { self.root }

    /// The root node, which always covers every point.
    #[must_use]
    pub fn root_node(&self) -> &DendroNode {
        &self.nodes[self.root.0]
    }

    /// Number of points the dendrogram was built over.
    #[rustfmt::skip]
    #[must_use]
    pub fn point_count(&self) -> usize { self.point_count }

    /// Arena size, including nodes detached by condensation.
    #[rustfmt::skip]
    #[must_use]
    pub fn arena_len(&self) -> usize { self.nodes.len() }

    /// Returns whether [`Self::condense`] has run.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_condensed(&self) -> bool { self.condensed }

    /// Looks up a node by handle.
    ///
    /// # Errors
    /// Returns [`DendrogramError::InvalidNodeId`] when `id` is out of range.
    pub fn node(&self, id: NodeId) -> Result<&DendroNode, DendrogramError> {
        self.nodes.get(id.0).ok_or(DendrogramError::InvalidNodeId {
            id,
            len: self.nodes.len(),
        })
    }

    /// Iterates the nodes still reachable from the root, parents before
    /// children.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DendroNode)> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id.0];
            if let Some(children) = &node.children {
                stack.extend(children.iter().rev().copied());
            }
            Some((id, node))
        })
    }

    /// Reachable nodes with every child before its parent.
    fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            if let Some(children) = &self.nodes[id.0].children {
                stack.extend(children.iter().rev().map(|&child| (child, false)));
            }
        }
        order
    }
}

fn merge_sorted(left: &[usize], right: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}
