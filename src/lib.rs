//! priq - Intrusive Binary Heap Priority Queue
//!
//! This library implements a fixed-capacity, array-backed binary heap that stores
//! references to caller-owned elements. Each element carries its own priority and
//! a position back-reference maintained by the queue, which gives O(log n)
//! priority change and arbitrary removal without searching the heap.
//!
//! Every operation on a [`PriorityQueue`] is serialized by a single mutex per
//! instance, so a queue can be shared between threads behind an `Arc`.

pub mod config;
pub mod data_structures;
pub mod element;

pub use config::QueueConfig;
pub use data_structures::PriorityQueue;
/// Re-export the element contract for convenient use
pub use element::{
    Compare, HeapElement, HeapPosition, MaxFirst, MinFirst, Node, PositionField, PriorityField,
};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("Failed to allocate storage for {0} elements")]
    AllocationFailure(usize),

    #[error("Queue is full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("Queue is empty")]
    QueueEmpty,

    #[error("Element is already queued at position {0}")]
    AlreadyQueued(usize),

    #[error("Element is not resident in this queue")]
    NotQueued,

    #[error("Internal queue failure: {0}")]
    Unknown(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
