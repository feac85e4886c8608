use std::cmp::Ordering;

/// Neighbour discovered during a search.
///
/// Ordered by distance, then id, so sorting a candidate list is
/// deterministic even when distances tie.
///
/// # Examples
/// ```
/// use strata_core::Neighbour;
///
/// let mut candidates = vec![
///     Neighbour { id: 4, distance: 0.5 },
///     Neighbour { id: 2, distance: 0.5 },
///     Neighbour { id: 9, distance: 0.1 },
/// ];
/// candidates.sort();
/// let ids: Vec<_> = candidates.iter().map(|n| n.id).collect();
/// assert_eq!(ids, vec![9, 2, 4]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbour {
    /// Row index of the neighbour.
    pub id: usize,
    /// Distance between the query and [`Neighbour::id`].
    pub distance: f64,
}

impl Eq for Neighbour {}

impl Ord for Neighbour {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Neighbour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
