//! Stability-based selection of flat clusters.

use tracing::{Span, field, instrument};

use super::{Dendrogram, NodeId};

impl Dendrogram {
    /// Selects the most stable antichain of nodes reachable from the root.
    ///
    /// Childless nodes start selected. Walking children before parents, a
    /// node whose children's combined score exceeds its own stability passes
    /// that sum upward; otherwise the node is selected in place of its
    /// children. Nodes with a selected ancestor are then dropped. The result
    /// is ordered by each node's smallest point and its point sets are
    /// pairwise disjoint. Points covered by no selected node are outliers.
    ///
    /// Scores are propagated in a scratch buffer, so repeated calls return
    /// the same selection.
    #[instrument(
        name = "hierarchy.extract",
        skip(self),
        fields(points = self.point_count, clusters = field::Empty),
    )]
    pub fn extract_clusters(&self) -> Vec<NodeId> {
        let order = self.post_order();
        let mut score: Vec<f64> = self.nodes.iter().map(|node| node.stability).collect();
        let mut selected = vec![false; self.nodes.len()];

        for &id in &order {
            let children = match self.nodes[id.0].children.as_deref() {
                Some(children) if !children.is_empty() => children,
                _ => {
                    selected[id.0] = true;
                    continue;
                }
            };
            let combined: f64 = children.iter().map(|child| score[child.0]).sum();
            if combined > score[id.0] {
                score[id.0] = combined;
            } else {
                selected[id.0] = true;
                for child in children {
                    selected[child.0] = false;
                }
            }
        }

        let mut clusters: Vec<NodeId> = order
            .into_iter()
            .filter(|id| selected[id.0] && !self.has_selected_ancestor(*id, &selected))
            .collect();
        clusters.sort_unstable_by_key(|id| self.nodes[id.0].points.first().copied());
        Span::current().record("clusters", clusters.len());
        clusters
    }

    fn has_selected_ancestor(&self, id: NodeId, selected: &[bool]) -> bool {
        let mut current = self.nodes[id.0].parent;
        while let Some(ancestor) = current {
            if selected[ancestor.0] {
                return true;
            }
            current = self.nodes[ancestor.0].parent;
        }
        false
    }
}
