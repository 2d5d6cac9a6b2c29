#![allow(dead_code)]

use std::fmt::Debug;
use std::sync::Arc;

use priq::{Compare, Node, PriorityField};

pub type TestNode = Node<usize, u32>;

// Builds detached nodes whose payload is their index
pub fn nodes(priorities: &[u32]) -> Vec<Arc<TestNode>> {
    priorities
        .iter()
        .enumerate()
        .map(|(i, &priority)| Arc::new(Node::new(i, priority)))
        .collect()
}

/// Rebuilds the heap layout from the position fields of `nodes` and checks
/// that positions are dense and unique and that no child beats its parent
pub fn assert_heap_shape<T, P, C>(nodes: &[Arc<Node<T, P>>], len: usize, cmp: &C)
where
    P: Clone + Debug,
    C: Compare<P>,
{
    let mut by_position: Vec<Option<&Arc<Node<T, P>>>> = vec![None; len + 1];
    for node in nodes.iter().filter(|n| n.position() != 0) {
        let position = node.position();
        assert!(
            (1..=len).contains(&position),
            "position {} outside 1..={}",
            position,
            len
        );
        assert!(
            by_position[position].is_none(),
            "two elements claim position {}",
            position
        );
        by_position[position] = Some(node);
    }

    for position in 1..=len {
        assert!(by_position[position].is_some(), "position {} is unclaimed", position);
    }

    for position in 2..=len {
        let parent = by_position[position / 2].map(|n| n.priority());
        let child = by_position[position].map(|n| n.priority());
        if let (Some(parent), Some(child)) = (parent, child) {
            assert!(
                !cmp.prefers(&parent, &child),
                "child {:?} at {} beats parent {:?}",
                child,
                position,
                parent
            );
        }
    }
}
