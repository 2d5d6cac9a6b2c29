mod heap_storage;
pub mod priority_queue;

pub use priority_queue::PriorityQueue;
