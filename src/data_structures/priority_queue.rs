use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, trace, warn};

use crate::config::QueueConfig;
use crate::data_structures::heap_storage::HeapStorage;
use crate::element::{Compare, HeapElement, PositionField};
use crate::{Error, Result};

/// A fixed-capacity intrusive priority queue
///
/// The queue holds `Arc` references to caller-owned elements and keeps each
/// element's [`HeapPosition`](crate::HeapPosition) pointing at its slot, so [`update_priority`] and
/// [`remove`] locate an element directly instead of searching for it. An element
/// can be resident in at most one queue at a time.
///
/// Every operation takes the instance mutex for its whole body, so the queue can
/// be shared between threads behind an `Arc`. Operations are fully serialized,
/// reads included.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use priq::{MaxFirst, Node, PriorityQueue};
///
/// let queue = PriorityQueue::new(8, MaxFirst).unwrap();
/// let a = Arc::new(Node::new('a', 5u32));
/// let b = Arc::new(Node::new('b', 3u32));
/// queue.push(a.clone()).unwrap();
/// queue.push(b.clone()).unwrap();
///
/// queue.update_priority(&b, 10).unwrap();
/// assert!(Arc::ptr_eq(&queue.pop().unwrap(), &b));
/// assert!(Arc::ptr_eq(&queue.pop().unwrap(), &a));
/// ```
///
/// [`update_priority`]: PriorityQueue::update_priority
/// [`remove`]: PriorityQueue::remove
pub struct PriorityQueue<E: HeapElement, C> {
    /// Heap storage, guarded by the instance lock
    inner: Mutex<HeapStorage<E>>,

    /// Eligibility predicate, fixed at creation
    comparator: C,

    /// Maximum number of resident elements
    capacity: usize,

    /// Tag for log messages
    label: String,
}

impl<E, C> PriorityQueue<E, C>
where
    E: HeapElement,
    C: Compare<E::Priority>,
{
    /// Creates an empty queue holding at most `capacity` elements
    pub fn new(capacity: usize, comparator: C) -> Result<Self> {
        Self::with_config(QueueConfig::new(capacity), comparator)
    }

    /// Creates an empty queue from a configuration
    ///
    /// Fails with `InvalidParam` for a zero capacity and `AllocationFailure`
    /// when the backing storage cannot be reserved.
    pub fn with_config(config: QueueConfig, comparator: C) -> Result<Self> {
        if config.capacity == 0 {
            warn!("[{}] create rejected: zero capacity", config.label);
            return Err(Error::InvalidParam(
                "capacity must be greater than zero".to_string(),
            ));
        }

        let storage = HeapStorage::with_capacity(config.capacity).map_err(|e| {
            warn!("[{}] create failed: {}", config.label, e);
            e
        })?;

        debug!("[{}] created with capacity {}", config.label, config.capacity);

        Ok(PriorityQueue {
            inner: Mutex::new(storage),
            comparator,
            capacity: config.capacity,
            label: config.label,
        })
    }

    /// Inserts an element
    ///
    /// Fails with `AlreadyQueued` if the element is resident in this or another
    /// queue, and `QueueFull` when the queue is at capacity.
    pub fn push(&self, element: Arc<E>) -> Result<()> {
        let mut heap = self.lock()?;

        // Claim the cell before storing; the sift overwrites the provisional slot
        if let Err(position) = element.heap_position().try_claim(heap.len() + 1) {
            return Err(self.reject("push", Error::AlreadyQueued(position)));
        }

        let position = match heap.push(Arc::clone(&element), &self.comparator) {
            Ok(position) => position,
            Err(e) => {
                element.heap_position().clear();
                return Err(self.reject("push", e));
            }
        };
        trace!("[{}] pushed to position {}", self.label, position);
        Ok(())
    }

    /// Removes and returns the most eligible element
    pub fn pop(&self) -> Result<Arc<E>> {
        let mut heap = self.lock()?;
        heap.pop(&self.comparator)
            .ok_or_else(|| self.reject("pop", Error::QueueEmpty))
    }

    /// Returns the most eligible element without removing it
    pub fn peek(&self) -> Result<Arc<E>> {
        let heap = self.lock()?;
        heap.peek()
            .cloned()
            .ok_or_else(|| self.reject("peek", Error::QueueEmpty))
    }

    /// Changes the priority of a resident element and restores the ordering
    ///
    /// The element must currently sit in this queue: an empty queue yields
    /// `QueueEmpty` and a foreign element yields `NotQueued`. On error the
    /// element's priority is left unchanged.
    pub fn update_priority(&self, element: &Arc<E>, priority: E::Priority) -> Result<()> {
        let mut heap = self.lock()?;
        let position = self.locate(&heap, element, "update_priority")?;

        let moved_to = heap
            .update_priority(position, priority, &self.comparator)
            .ok_or_else(|| self.reject("update_priority", Error::NotQueued))?;
        trace!(
            "[{}] priority updated, position {} -> {}",
            self.label,
            position,
            moved_to
        );
        Ok(())
    }

    /// Removes a resident element from anywhere in the queue and returns it
    ///
    /// Removing from an empty queue yields `QueueEmpty`; removing an element
    /// that is not resident here yields `NotQueued`.
    pub fn remove(&self, element: &Arc<E>) -> Result<Arc<E>> {
        let mut heap = self.lock()?;
        let position = self.locate(&heap, element, "remove")?;

        heap.remove_at(position, &self.comparator)
            .ok_or_else(|| self.reject("remove", Error::NotQueued))
    }

    /// Returns true if `element` is resident in this queue
    pub fn contains(&self, element: &Arc<E>) -> Result<bool> {
        let heap = self.lock()?;
        Ok(heap.holds(element.heap_position().get(), element))
    }

    /// Visits every resident element in extraction order without modifying
    /// the queue
    ///
    /// The element references are copied into a scratch heap which is then
    /// drained; positions of the resident elements are never written. The
    /// queue stays locked for the whole traversal, so `visitor` must not call
    /// back into the same queue.
    pub fn for_each_ordered<F>(&self, mut visitor: F) -> Result<()>
    where
        F: FnMut(&Arc<E>),
    {
        let heap = self.lock()?;
        let mut scratch = heap
            .detached_copy()
            .map_err(|e| self.reject("for_each_ordered", e))?;

        while let Some(element) = scratch.pop(&self.comparator) {
            visitor(&element);
        }
        Ok(())
    }

    /// Returns every resident element in extraction order
    pub fn ordered(&self) -> Result<Vec<Arc<E>>> {
        let mut elements = Vec::with_capacity(self.len());
        self.for_each_ordered(|element| elements.push(Arc::clone(element)))?;
        Ok(elements)
    }

    /// Removes every element, detaching each one
    pub fn clear(&self) -> Result<()> {
        let mut heap = self.lock()?;
        let dropped = heap.drain();
        debug!("[{}] cleared {} elements", self.label, dropped.len());
        Ok(())
    }

    /// Tears the queue down, returning the elements still resident in slot
    /// order
    ///
    /// Every returned element is detached and may be pushed into another queue.
    pub fn destroy(self) -> Result<Vec<Arc<E>>> {
        let remaining = self.lock()?.drain();
        debug!(
            "[{}] destroyed with {} resident elements",
            self.label,
            remaining.len()
        );
        Ok(remaining)
    }
}

impl<E: HeapElement, C> PriorityQueue<E, C> {
    /// Returns the number of resident elements
    pub fn len(&self) -> usize {
        self.lock_unpoisoned().len()
    }

    /// Returns true if no element is resident
    pub fn is_empty(&self) -> bool {
        self.lock_unpoisoned().is_empty()
    }

    /// Returns true if a push would be rejected with `QueueFull`
    pub fn is_full(&self) -> bool {
        self.lock_unpoisoned().is_full()
    }

    /// Returns the fixed capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the label used in log messages
    pub fn label(&self) -> &str {
        &self.label
    }

    fn lock(&self) -> Result<MutexGuard<'_, HeapStorage<E>>> {
        self.inner.lock().map_err(|_| {
            warn!("[{}] lock poisoned by a panicking operation", self.label);
            Error::Unknown("queue lock poisoned".to_string())
        })
    }

    // Sifts only swap slots, so the element count survives a panic
    fn lock_unpoisoned(&self) -> MutexGuard<'_, HeapStorage<E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves the slot of a resident element
    fn locate(&self, heap: &HeapStorage<E>, element: &Arc<E>, op: &str) -> Result<usize> {
        if heap.is_empty() {
            return Err(self.reject(op, Error::QueueEmpty));
        }

        let position = element.heap_position().get();
        if heap.holds(position, element) {
            Ok(position)
        } else {
            Err(self.reject(op, Error::NotQueued))
        }
    }

    fn reject(&self, op: &str, err: Error) -> Error {
        warn!("[{}] {} rejected: {}", self.label, op, err);
        err
    }
}

impl<E: HeapElement, C> Drop for PriorityQueue<E, C> {
    fn drop(&mut self) {
        let heap = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if !heap.is_empty() {
            let remaining = heap.drain();
            debug!(
                "[{}] dropped with {} resident elements",
                self.label,
                remaining.len()
            );
        }
    }
}

// `len` is `None` while the queue is locked, e.g. from inside a visitor
impl<E: HeapElement, C> fmt::Debug for PriorityQueue<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("label", &self.label)
            .field("len", &self.inner.try_lock().ok().map(|heap| heap.len()))
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
