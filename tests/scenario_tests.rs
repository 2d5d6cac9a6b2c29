mod common;

use std::sync::Arc;

use common::{assert_heap_shape, nodes, TestNode};
use priq::{Error, MaxFirst, MinFirst, PriorityField, PriorityQueue};

#[test]
fn test_pop_order_larger_wins() {
    let queue = PriorityQueue::new(4, MaxFirst).unwrap();
    let all = nodes(&[5, 3, 8, 1]);
    for node in &all {
        queue.push(Arc::clone(node)).unwrap();
    }
    assert_heap_shape(&all, 4, &MaxFirst);

    let popped: Vec<u32> = (0..4).map(|_| queue.pop().unwrap().priority()).collect();
    assert_eq!(popped, vec![8, 5, 3, 1]);
}

#[test]
fn test_push_past_capacity_is_rejected() {
    let queue = PriorityQueue::new(3, MinFirst).unwrap();
    let all = nodes(&[7, 2, 9, 4]);
    for node in &all[..3] {
        queue.push(Arc::clone(node)).unwrap();
    }
    assert!(queue.is_full());

    assert_eq!(
        queue.push(Arc::clone(&all[3])),
        Err(Error::QueueFull { capacity: 3 })
    );
    assert_eq!(queue.len(), 3);
    assert_eq!(all[3].position(), 0);
}

#[test]
fn test_update_priority_promotes_element() {
    let queue = PriorityQueue::new(3, MaxFirst).unwrap();
    let all = nodes(&[1, 2, 3]);
    for node in &all {
        queue.push(Arc::clone(node)).unwrap();
    }

    queue.update_priority(&all[0], 10).unwrap();
    assert_heap_shape(&all, 3, &MaxFirst);

    let top = queue.pop().unwrap();
    assert!(Arc::ptr_eq(&top, &all[0]));
    assert_eq!(top.priority(), 10);
}

#[test]
fn test_remove_root_keeps_order() {
    let queue = PriorityQueue::new(4, MaxFirst).unwrap();
    let all = nodes(&[4, 9, 2, 7]);
    for node in &all {
        queue.push(Arc::clone(node)).unwrap();
    }
    assert_eq!(all[1].position(), 1);

    let removed = queue.remove(&all[1]).unwrap();
    assert!(Arc::ptr_eq(&removed, &all[1]));
    assert_eq!(removed.position(), 0);
    assert_heap_shape(&all, 3, &MaxFirst);

    let mut popped = Vec::new();
    while let Ok(node) = queue.pop() {
        popped.push(node.priority());
        assert_heap_shape(&all, queue.len(), &MaxFirst);
    }
    assert_eq!(popped, vec![7, 4, 2]);
}

#[test]
fn test_empty_queue_behavior() {
    let queue: PriorityQueue<TestNode, MinFirst> = PriorityQueue::new(2, MinFirst).unwrap();
    assert!(queue.is_empty());
    assert_eq!(queue.pop().unwrap_err(), Error::QueueEmpty);
    assert_eq!(queue.peek().unwrap_err(), Error::QueueEmpty);

    for node in nodes(&[3, 1]) {
        queue.push(node).unwrap();
    }
    queue.pop().unwrap();
    queue.pop().unwrap();

    assert_eq!(queue.pop().unwrap_err(), Error::QueueEmpty);
    assert_eq!(queue.peek().unwrap_err(), Error::QueueEmpty);
}

#[test]
fn test_peek_does_not_remove() {
    let queue = PriorityQueue::new(4, MinFirst).unwrap();
    let all = nodes(&[6, 2, 8]);
    for node in &all {
        queue.push(Arc::clone(node)).unwrap();
    }

    let first = queue.peek().unwrap();
    let second = queue.peek().unwrap();
    assert!(Arc::ptr_eq(&first, &all[1]));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.position(), 1);
    assert_eq!(queue.len(), 3);
}

#[test]
fn test_update_to_same_priority_is_noop() {
    let queue = PriorityQueue::new(8, MaxFirst).unwrap();
    let all = nodes(&[12, 40, 7, 33, 19, 40, 1]);
    for node in &all {
        queue.push(Arc::clone(node)).unwrap();
    }
    let before: Vec<usize> = all.iter().map(|n| n.position()).collect();

    for node in &all {
        queue.update_priority(node, node.priority()).unwrap();
        assert_heap_shape(&all, all.len(), &MaxFirst);
    }

    let after: Vec<usize> = all.iter().map(|n| n.position()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_update_priority_demotes_root() {
    let queue = PriorityQueue::new(8, MinFirst).unwrap();
    let all = nodes(&[1, 5, 3, 9, 6]);
    for node in &all {
        queue.push(Arc::clone(node)).unwrap();
    }

    queue.update_priority(&all[0], 100).unwrap();
    assert_heap_shape(&all, all.len(), &MinFirst);

    let popped: Vec<u32> = (0..5).map(|_| queue.pop().unwrap().priority()).collect();
    assert_eq!(popped, vec![3, 5, 6, 9, 100]);
}

#[test]
fn test_zero_capacity_is_invalid() {
    let result = PriorityQueue::<TestNode, _>::new(0, MaxFirst);
    assert!(matches!(result, Err(Error::InvalidParam(_))));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::QueueFull { capacity: 3 }.to_string(),
        "Queue is full (capacity 3)"
    );
    assert_eq!(Error::QueueEmpty.to_string(), "Queue is empty");
    assert_eq!(
        Error::AlreadyQueued(2).to_string(),
        "Element is already queued at position 2"
    );
}

#[test]
fn test_debug_format_inside_visitor() {
    let queue = PriorityQueue::new(4, MinFirst).unwrap();
    for node in nodes(&[3, 1, 2]) {
        queue.push(node).unwrap();
    }

    let mut rendered = Vec::new();
    queue
        .for_each_ordered(|_| rendered.push(format!("{:?}", queue)))
        .unwrap();
    assert_eq!(rendered.len(), 3);
    assert!(rendered[0].contains("len: None"));

    assert!(format!("{:?}", queue).contains("len: Some(3)"));
}
