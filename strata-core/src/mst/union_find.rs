//! Internally synchronised union-find shared by the spanning tree builders.
//!
//! Borůvka workers call [`UnionFind::find`] concurrently while proposing
//! edges; unions only happen during the serial commit phase. A single mutex
//! guards the parent and rank arrays, so `find` can compress paths without
//! any external coordination.

use std::sync::{Mutex, MutexGuard};

use super::MstError;

/// Unsynchronised disjoint-set forest with path compression and union by
/// rank. [`UnionFind`] guards one behind a mutex; the dendrogram fold drives
/// one directly.
#[derive(Clone, Debug)]
pub(crate) struct Forest {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl Forest {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        }
    }

    #[rustfmt::skip]
    pub(crate) const fn components(&self) -> usize { self.components }

    pub(crate) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Links two representatives and returns the survivor. Equal roots are
    /// returned unchanged.
    pub(crate) fn union_roots(&mut self, mut left: usize, mut right: usize) -> usize {
        if left == right {
            return left;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        self.components -= 1;
        left
    }

    fn union(&mut self, left: usize, right: usize) -> bool {
        let left = self.find(left);
        let right = self.find(right);
        if left == right {
            return false;
        }
        self.union_roots(left, right);
        true
    }
}

/// Disjoint-set forest with path compression and union by rank.
///
/// # Examples
/// ```
/// use strata_core::UnionFind;
///
/// let uf = UnionFind::new(4);
/// assert!(uf.union(0, 1)?);
/// assert!(!uf.union(1, 0)?);
/// assert_eq!(uf.find(0)?, uf.find(1)?);
/// assert_ne!(uf.find(0)?, uf.find(2)?);
/// assert_eq!(uf.components()?, 3);
/// # Ok::<(), strata_core::MstError>(())
/// ```
#[derive(Debug)]
pub struct UnionFind {
    inner: Mutex<Forest>,
    len: usize,
}

impl UnionFind {
    /// Creates `len` singleton sets.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            inner: Mutex::new(Forest::new(len)),
            len,
        }
    }

    /// Number of elements tracked.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.len }

    /// Returns whether no elements are tracked.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the representative of `node`'s set.
    ///
    /// # Panics
    /// Panics when `node` is out of range.
    ///
    /// # Errors
    /// Returns [`MstError::LockPoisoned`] when another thread panicked while
    /// holding the lock.
    pub fn find(&self, node: usize) -> Result<usize, MstError> {
        self.assert_in_range(node);
        Ok(self.lock()?.find(node))
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `true` when a merge happened and `false` when both elements
    /// already shared a set.
    ///
    /// # Panics
    /// Panics when either index is out of range.
    ///
    /// # Errors
    /// Returns [`MstError::LockPoisoned`] when the lock is poisoned.
    pub fn union(&self, left: usize, right: usize) -> Result<bool, MstError> {
        self.assert_in_range(left);
        self.assert_in_range(right);
        Ok(self.lock()?.union(left, right))
    }

    /// Returns the number of disjoint sets.
    ///
    /// # Errors
    /// Returns [`MstError::LockPoisoned`] when the lock is poisoned.
    pub fn components(&self) -> Result<usize, MstError> {
        Ok(self.lock()?.components())
    }

    /// Returns, for every set, its lowest element, ordered by representative.
    ///
    /// # Errors
    /// Returns [`MstError::LockPoisoned`] when the lock is poisoned.
    pub fn lowest_members(&self) -> Result<Vec<usize>, MstError> {
        let mut forest = self.lock()?;
        let mut lowest = vec![usize::MAX; self.len];
        for node in 0..self.len {
            let root = forest.find(node);
            if lowest[root] == usize::MAX {
                lowest[root] = node;
            }
        }
        Ok(lowest.into_iter().filter(|&node| node != usize::MAX).collect())
    }

    fn assert_in_range(&self, node: usize) {
        assert!(
            node < self.len,
            "union-find index {node} out of range for {} elements",
            self.len
        );
    }

    fn lock(&self) -> Result<MutexGuard<'_, Forest>, MstError> {
        self.inner.lock().map_err(|_| MstError::LockPoisoned {
            resource: "union-find forest",
        })
    }
}
