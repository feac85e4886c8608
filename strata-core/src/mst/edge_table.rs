//! Per-round table of the cheapest edge leaving each component.

use std::sync::{Mutex, MutexGuard};

use super::{Edge, MstError};

/// Concurrency-safe table mapping a component representative to the
/// cheapest outgoing edge proposed for it during the current round.
///
/// Each slot has its own lock, so workers proposing for different components
/// never contend. A slot keeps the minimum under the total [`Edge`] order,
/// which makes the final contents independent of proposal order.
///
/// # Examples
/// ```
/// use strata_core::{CheapestEdgeTable, Edge};
///
/// let table = CheapestEdgeTable::new(3);
/// table.update(0, Edge::new(0, 2, 4.0)?)?;
/// table.update(0, Edge::new(0, 1, 1.5)?)?;
/// table.update(0, Edge::new(0, 2, 9.0)?)?;
/// assert_eq!(table.get(0)?, Some(Edge::new(0, 1, 1.5)?));
/// assert_eq!(table.get(1)?, None);
/// # Ok::<(), strata_core::MstError>(())
/// ```
#[derive(Debug)]
pub struct CheapestEdgeTable {
    slots: Vec<Mutex<Option<Edge>>>,
}

impl CheapestEdgeTable {
    /// Creates a table with `len` empty slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| Mutex::new(None)).collect(),
        }
    }

    /// Number of slots.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.slots.len() }

    /// Returns whether the table has no slots.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Clears every slot ahead of a new round.
    ///
    /// # Errors
    /// Returns [`MstError::LockPoisoned`] when a slot lock is poisoned.
    pub fn reset(&self) -> Result<(), MstError> {
        for slot in &self.slots {
            *lock(slot)? = None;
        }
        Ok(())
    }

    /// Offers `edge` as the cheapest edge leaving `component`.
    ///
    /// The stored edge is replaced only when `edge` sorts strictly before
    /// it. Returns whether the slot changed.
    ///
    /// # Panics
    /// Panics when `component` is out of range.
    ///
    /// # Errors
    /// Returns [`MstError::LockPoisoned`] when the slot lock is poisoned.
    pub fn update(&self, component: usize, edge: Edge) -> Result<bool, MstError> {
        let mut slot = lock(&self.slots[component])?;
        match *slot {
            Some(current) if current <= edge => Ok(false),
            _ => {
                *slot = Some(edge);
                Ok(true)
            }
        }
    }

    /// Returns the edge currently stored for `component`.
    ///
    /// # Panics
    /// Panics when `component` is out of range.
    ///
    /// # Errors
    /// Returns [`MstError::LockPoisoned`] when the slot lock is poisoned.
    pub fn get(&self, component: usize) -> Result<Option<Edge>, MstError> {
        Ok(*lock(&self.slots[component])?)
    }

    /// Takes every stored edge in ascending slot order, leaving the table
    /// empty.
    ///
    /// # Errors
    /// Returns [`MstError::LockPoisoned`] when a slot lock is poisoned.
    pub fn drain(&self) -> Result<Vec<Edge>, MstError> {
        let mut edges = Vec::new();
        for slot in &self.slots {
            if let Some(edge) = lock(slot)?.take() {
                edges.push(edge);
            }
        }
        Ok(edges)
    }
}

fn lock(slot: &Mutex<Option<Edge>>) -> Result<MutexGuard<'_, Option<Edge>>, MstError> {
    slot.lock().map_err(|_| MstError::LockPoisoned {
        resource: "cheapest-edge slot",
    })
}
