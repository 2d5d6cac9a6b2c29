pub mod traits;
pub mod position;
pub mod node;

pub use traits::{Compare, HeapElement, MaxFirst, MinFirst, PositionField, PriorityField};
pub use position::HeapPosition;
pub use node::Node;
