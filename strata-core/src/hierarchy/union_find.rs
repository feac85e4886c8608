//! Disjoint set used while folding spanning tree edges into the dendrogram.
//!
//! Edges are merged in ascending order; `component_node` maps each set
//! representative to the arena node that currently stands for that set, so
//! every merge finds its two live clusters without scanning.

use crate::mst::Forest;

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    forest: Forest,
    pub(super) component_node: Vec<usize>,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            forest: Forest::new(n),
            component_node: (0..n).collect(),
        }
    }

    pub(super) fn find(&mut self, node: usize) -> usize {
        self.forest.find(node)
    }

    /// Merges two roots and returns the surviving representative.
    pub(super) fn union_roots(&mut self, left: usize, right: usize) -> usize {
        self.forest.union_roots(left, right)
    }
}
