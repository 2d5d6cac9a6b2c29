use std::fmt::Debug;

use crate::element::HeapPosition;

/// Trait for elements that carry a priority the queue can read and write
///
/// Elements are shared with the queue through an `Arc`, so the setter takes
/// `&self` and implementors choose their own interior mutability.
pub trait PriorityField {
    /// Priority value stored on the element
    type Priority: Clone + Debug;

    /// Returns the current priority of the element
    fn priority(&self) -> Self::Priority;

    /// Overwrites the priority of the element
    ///
    /// While the element is resident in a queue, change its priority through
    /// [`PriorityQueue::update_priority`](crate::PriorityQueue::update_priority)
    /// instead, otherwise the heap ordering is silently broken.
    fn set_priority(&self, priority: Self::Priority);
}

/// Trait for elements that embed a position back-reference
///
/// The queue is the only writer of the returned [`HeapPosition`].
pub trait PositionField {
    /// Returns the position cell maintained by the queue
    fn heap_position(&self) -> &HeapPosition;
}

/// Any element type usable by the queue
pub trait HeapElement: PriorityField + PositionField {}

impl<E> HeapElement for E where E: PriorityField + PositionField {}

/// Trait for the eligibility predicate bound to a queue
pub trait Compare<P> {
    /// Returns true if an element carrying `candidate` is more eligible for
    /// extraction than one carrying `current`
    fn prefers(&self, current: &P, candidate: &P) -> bool;
}

impl<P, F> Compare<P> for F
where
    F: Fn(&P, &P) -> bool,
{
    fn prefers(&self, current: &P, candidate: &P) -> bool {
        self(current, candidate)
    }
}

/// Larger priorities are extracted first (max-heap)
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxFirst;

impl<P: Ord> Compare<P> for MaxFirst {
    #[inline]
    fn prefers(&self, current: &P, candidate: &P) -> bool {
        candidate > current
    }
}

/// Smaller priorities are extracted first (min-heap)
#[derive(Debug, Default, Clone, Copy)]
pub struct MinFirst;

impl<P: Ord> Compare<P> for MinFirst {
    #[inline]
    fn prefers(&self, current: &P, candidate: &P) -> bool {
        candidate < current
    }
}
