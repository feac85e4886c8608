//! HDBSCAN condensation and excess-of-mass stability.
//!
//! Walking children before parents, each internal node drops the children
//! smaller than `min_cluster_size` (their points stay in the node's point
//! set and fall out of the cluster at the node's merge distance). Each
//! surviving child `C` of node `X` accrues `|C| · (λ(C) − λ(X))`, the mass it
//! holds between its birth at `X` and its own split. A node with a single
//! survivor is the same cluster continuing: the survivor is spliced out and
//! its stability folded into the node. The root finally accrues
//! `|root| · λ(root)`.

use std::num::NonZeroUsize;

use tracing::{instrument, warn};

use super::{Dendrogram, NodeId};

impl Dendrogram {
    /// Condenses the tree in place and scores node stability.
    ///
    /// Afterwards every node reachable from the root, other than the root
    /// itself, covers at least `min_cluster_size` points. Absorbed nodes stay
    /// in the arena but are detached from the tree. A second call is a no-op.
    #[instrument(
        name = "hierarchy.condense",
        skip(self),
        fields(
            points = self.point_count,
            min_cluster_size = min_cluster_size.get(),
        ),
    )]
    pub fn condense(&mut self, min_cluster_size: NonZeroUsize) {
        if self.condensed {
            warn!("dendrogram already condensed, ignoring repeated request");
            return;
        }
        let min_size = min_cluster_size.get();
        for id in self.post_order() {
            self.condense_node(id, min_size);
        }

        let root = &mut self.nodes[self.root.0];
        root.stability += mass(root.points.len(), lambda(root.merge_distance).unwrap_or(0.0));
        self.condensed = true;
    }

    fn condense_node(&mut self, id: NodeId, min_size: usize) {
        let Some(children) = self.nodes[id.0].children.take() else {
            return;
        };
        let birth = lambda(self.nodes[id.0].merge_distance);

        let mut survivors = Vec::with_capacity(children.len());
        for child in children {
            let node = &mut self.nodes[child.0];
            if node.points.len() < min_size {
                node.parent = None;
                continue;
            }
            let gap = match (lambda(node.merge_distance), birth) {
                (Some(death), Some(birth)) => death - birth,
                _ => 0.0,
            };
            node.stability += mass(node.points.len(), gap);
            survivors.push(child);
        }

        if let [only] = survivors[..] {
            let spliced = &mut self.nodes[only.0];
            spliced.parent = None;
            let folded = spliced.stability;
            let grandchildren = spliced.children.take().unwrap_or_default();
            for grandchild in &grandchildren {
                self.nodes[grandchild.0].parent = Some(id);
            }
            let node = &mut self.nodes[id.0];
            node.stability += folded;
            node.children = Some(grandchildren);
        } else {
            self.nodes[id.0].children = Some(survivors);
        }
    }
}

/// `1 / distance`, with zero mapping to `+inf`; `None` for leaves.
fn lambda(merge_distance: Option<f64>) -> Option<f64> {
    merge_distance.map(|distance| {
        if distance == 0.0 {
            f64::INFINITY
        } else {
            distance.recip()
        }
    })
}

/// `size · gap`, treating undefined gaps (`inf − inf`) and zero gaps as no
/// mass.
fn mass(size: usize, gap: f64) -> f64 {
    if gap > 0.0 { size as f64 * gap } else { 0.0 }
}
