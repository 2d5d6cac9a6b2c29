use std::marker::PhantomData;
use std::sync::Arc;

use log::trace;

use crate::element::{Compare, HeapElement, PositionField, PriorityField};
use crate::{Error, Result};

/// Controls what happens when the heap moves an element to a new slot
pub(crate) trait PositionSink {
    /// Records that `element` now sits at the 1-based `position`
    fn record<E: PositionField>(element: &E, position: usize);

    /// Records that `element` left the heap
    fn detach<E: PositionField>(element: &E);
}

/// Writes every move through to the element's position field
#[derive(Debug)]
pub(crate) struct Tracked;

impl PositionSink for Tracked {
    #[inline]
    fn record<E: PositionField>(element: &E, position: usize) {
        element.heap_position().set(position);
    }

    #[inline]
    fn detach<E: PositionField>(element: &E) {
        element.heap_position().clear();
    }
}

/// Leaves position fields untouched, for scratch copies of a live heap
#[derive(Debug)]
pub(crate) struct Detached;

impl PositionSink for Detached {
    #[inline]
    fn record<E: PositionField>(_element: &E, _position: usize) {}

    #[inline]
    fn detach<E: PositionField>(_element: &E) {}
}

/// Fixed-capacity backing array of a binary heap
///
/// Positions are 1-based: the root lives at position 1, the children of `p`
/// at `2p` and `2p + 1`, its parent at `p / 2`. Position 0 is the sentinel and
/// is never occupied, so the element at position `p` is stored at `slots[p - 1]`.
///
/// The backing vector is reserved once and never grows past `capacity`.
#[derive(Debug)]
pub(crate) struct HeapStorage<E, S = Tracked> {
    /// Resident elements in heap order
    slots: Vec<Arc<E>>,

    /// Maximum number of resident elements
    capacity: usize,

    _sink: PhantomData<S>,
}

impl<E, S> HeapStorage<E, S>
where
    E: HeapElement,
    S: PositionSink,
{
    /// Allocates storage for exactly `capacity` elements
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailure(capacity))?;

        Ok(HeapStorage {
            slots,
            capacity,
            _sink: PhantomData,
        })
    }

    /// Returns the number of resident elements
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Returns the element at the 1-based `position`, if occupied
    #[inline]
    pub(crate) fn slot(&self, position: usize) -> Option<&Arc<E>> {
        position.checked_sub(1).and_then(|k| self.slots.get(k))
    }

    /// Returns the most eligible element without removing it
    #[inline]
    pub(crate) fn peek(&self) -> Option<&Arc<E>> {
        self.slots.first()
    }

    /// Returns true if `element` is the exact element stored at `position`
    pub(crate) fn holds(&self, position: usize, element: &Arc<E>) -> bool {
        self.slot(position)
            .is_some_and(|resident| Arc::ptr_eq(resident, element))
    }

    /// Appends an element and sifts it up to its place
    ///
    /// Returns the final position of the element.
    pub(crate) fn push<C>(&mut self, element: Arc<E>, cmp: &C) -> Result<usize>
    where
        C: Compare<E::Priority>,
    {
        if self.is_full() {
            return Err(Error::QueueFull {
                capacity: self.capacity,
            });
        }

        self.slots.push(element);
        Ok(self.sift_up(self.slots.len(), cmp))
    }

    /// Removes and returns the most eligible element
    pub(crate) fn pop<C>(&mut self, cmp: &C) -> Option<Arc<E>>
    where
        C: Compare<E::Priority>,
    {
        self.remove_at(1, cmp)
    }

    /// Removes the element at the 1-based `position`
    ///
    /// The last element fills the hole and is sifted in whichever direction
    /// its priority demands relative to the removed one.
    pub(crate) fn remove_at<C>(&mut self, position: usize, cmp: &C) -> Option<Arc<E>>
    where
        C: Compare<E::Priority>,
    {
        let removed_priority = self.slot(position)?.priority();

        let last = self.slots.len();
        self.slots.swap(position - 1, last - 1);
        let removed = self.slots.pop()?;
        S::detach(removed.as_ref());

        if position <= self.slots.len() {
            let moved_priority = self.slots[position - 1].priority();
            if cmp.prefers(&removed_priority, &moved_priority) {
                self.sift_up(position, cmp);
            } else {
                self.sift_down(position, cmp);
            }
        }

        Some(removed)
    }

    /// Writes a new priority to the element at `position` and restores the
    /// heap property around it
    ///
    /// Returns the element's final position, or `None` if `position` is empty.
    pub(crate) fn update_priority<C>(
        &mut self,
        position: usize,
        priority: E::Priority,
        cmp: &C,
    ) -> Option<usize>
    where
        C: Compare<E::Priority>,
    {
        let element = self.slot(position)?;
        let old_priority = element.priority();
        element.set_priority(priority.clone());

        if cmp.prefers(&old_priority, &priority) {
            Some(self.sift_up(position, cmp))
        } else {
            Some(self.sift_down(position, cmp))
        }
    }

    /// Removes every element, detaching each one, and returns them in slot order
    pub(crate) fn drain(&mut self) -> Vec<Arc<E>> {
        self.slots
            .drain(..)
            .inspect(|element| S::detach(element.as_ref()))
            .collect()
    }

    /// Copies the element references into a scratch heap that never writes
    /// positions back to the elements
    pub(crate) fn detached_copy(&self) -> Result<HeapStorage<E, Detached>> {
        let mut scratch = HeapStorage::<E, Detached>::with_capacity(self.slots.len())?;
        scratch.slots.extend(self.slots.iter().cloned());
        Ok(scratch)
    }

    /// Moves the element at `position` towards the root while its parent is
    /// less eligible, returning its final position
    fn sift_up<C>(&mut self, mut position: usize, cmp: &C) -> usize
    where
        C: Compare<E::Priority>,
    {
        let start = position;
        let held = self.slots[position - 1].priority();

        while position > 1 {
            let parent = position / 2;
            if !cmp.prefers(&self.slots[parent - 1].priority(), &held) {
                break;
            }

            // Parent moves down into the current slot
            self.slots.swap(parent - 1, position - 1);
            S::record(self.slots[position - 1].as_ref(), position);
            position = parent;
        }

        S::record(self.slots[position - 1].as_ref(), position);
        trace!("sift up {} -> {}", start, position);
        position
    }

    /// Moves the element at `position` towards the leaves while its more
    /// eligible child beats it, returning its final position
    fn sift_down<C>(&mut self, mut position: usize, cmp: &C) -> usize
    where
        C: Compare<E::Priority>,
    {
        let start = position;
        let held = self.slots[position - 1].priority();

        while let Some(child) = self.select_child(position, cmp) {
            if !cmp.prefers(&held, &self.slots[child - 1].priority()) {
                break;
            }

            // Child moves up into the current slot
            self.slots.swap(position - 1, child - 1);
            S::record(self.slots[position - 1].as_ref(), position);
            position = child;
        }

        S::record(self.slots[position - 1].as_ref(), position);
        trace!("sift down {} -> {}", start, position);
        position
    }

    /// Returns the more eligible child of `position`, or `None` at a leaf
    fn select_child<C>(&self, position: usize, cmp: &C) -> Option<usize>
    where
        C: Compare<E::Priority>,
    {
        let left = position * 2;
        if left > self.slots.len() {
            return None;
        }

        let right = left + 1;
        if right <= self.slots.len()
            && cmp.prefers(
                &self.slots[left - 1].priority(),
                &self.slots[right - 1].priority(),
            )
        {
            Some(right)
        } else {
            Some(left)
        }
    }
}

#[cfg(test)]
impl<E: HeapElement, S> HeapStorage<E, S> {
    /// Checks the heap property and every position back-reference
    pub(crate) fn assert_invariants<C>(&self, cmp: &C, tracked: bool)
    where
        C: Compare<E::Priority>,
    {
        for position in 2..=self.slots.len() {
            let parent = self.slots[position / 2 - 1].priority();
            let child = self.slots[position - 1].priority();
            assert!(
                !cmp.prefers(&parent, &child),
                "child {:?} at {} beats parent {:?}",
                child,
                position,
                parent
            );
        }
        if tracked {
            for (k, element) in self.slots.iter().enumerate() {
                assert_eq!(element.heap_position().get(), k + 1);
            }
        }
    }
}
