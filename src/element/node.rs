use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};

use crate::element::{HeapPosition, PositionField, PriorityField};

/// A ready-made queue element: a payload plus the priority and position
/// fields the queue needs
///
/// ```
/// use std::sync::Arc;
/// use priq::{MaxFirst, Node, PriorityQueue};
///
/// let queue = PriorityQueue::new(4, MaxFirst).unwrap();
/// queue.push(Arc::new(Node::new("low", 1u32))).unwrap();
/// queue.push(Arc::new(Node::new("high", 9u32))).unwrap();
///
/// assert_eq!(*queue.pop().unwrap().value(), "high");
/// ```
#[derive(Debug)]
pub struct Node<T, P> {
    value: T,
    priority: Mutex<P>,
    position: HeapPosition,
}

impl<T, P> Node<T, P> {
    /// Creates a detached node with the given payload and priority
    pub fn new(value: T, priority: P) -> Self {
        Node {
            value,
            priority: Mutex::new(priority),
            position: HeapPosition::new(),
        }
    }

    /// Returns the payload
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the 1-based heap slot, or 0 when not queued
    pub fn position(&self) -> usize {
        self.position.get()
    }

    /// Consumes the node and returns its payload
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T, P: Clone + Debug> PriorityField for Node<T, P> {
    type Priority = P;

    fn priority(&self) -> P {
        // A panic while the lock is held cannot leave a half-written priority
        self.priority
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_priority(&self, priority: P) {
        *self.priority.lock().unwrap_or_else(PoisonError::into_inner) = priority;
    }
}

impl<T, P> PositionField for Node<T, P> {
    fn heap_position(&self) -> &HeapPosition {
        &self.position
    }
}
