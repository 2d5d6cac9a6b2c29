use std::sync::atomic::{AtomicUsize, Ordering};

/// Position back-reference embedded in every queued element
///
/// Holds the element's 1-based slot in the heap while it is resident in a
/// queue, or [`HeapPosition::NOT_QUEUED`] otherwise. Position `0` is the
/// sentinel slot of the heap layout and never refers to a live element.
///
/// Callers can only read the cell; the queue is the sole writer.
#[derive(Debug, Default)]
pub struct HeapPosition(AtomicUsize);

impl HeapPosition {
    /// Value held by elements that are not resident in any queue
    pub const NOT_QUEUED: usize = 0;

    /// Creates a detached position cell
    pub const fn new() -> Self {
        HeapPosition(AtomicUsize::new(Self::NOT_QUEUED))
    }

    /// Returns the current 1-based slot, or `NOT_QUEUED`
    #[inline]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Returns true if the element currently sits in a queue
    #[inline]
    pub fn is_queued(&self) -> bool {
        self.get() != Self::NOT_QUEUED
    }

    /// Atomically takes a detached cell, recording `position`
    ///
    /// Fails with the current position if the element is already resident,
    /// so two queues can never both accept the same element.
    #[inline]
    pub(crate) fn try_claim(&self, position: usize) -> Result<(), usize> {
        self.0
            .compare_exchange(
                Self::NOT_QUEUED,
                position,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
    }

    #[inline]
    pub(crate) fn set(&self, position: usize) {
        self.0.store(position, Ordering::Release);
    }

    #[inline]
    pub(crate) fn clear(&self) {
        self.set(Self::NOT_QUEUED);
    }
}
