use std::env;
use std::sync::Arc;

use colored::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use priq::{Error, MaxFirst, MinFirst, Node, PriorityField, PriorityQueue, QueueConfig};

type DemoNode = Node<usize, u32>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let capacity: usize = if args.len() > 1 {
        args[1].parse().unwrap_or(10)
    } else {
        10
    };
    let seed: u64 = if args.len() > 2 {
        args[2].parse().unwrap_or(123)
    } else {
        123
    };

    let config = QueueConfig {
        capacity,
        ..Default::default()
    }
    .with_label("demo");

    println!("{}", "priq demo".bright_cyan().bold());
    println!("   Capacity: {}", config.capacity);
    println!("   Seed: {}", seed);
    println!();

    let mut rng = StdRng::seed_from_u64(seed);
    let queue = PriorityQueue::with_config(config, MaxFirst)?;

    println!("{}", "---------- push data --------------".bright_white().bold());
    let nodes: Vec<Arc<DemoNode>> = (0..capacity)
        .map(|i| Arc::new(Node::new(i, rng.gen_range(0..1_000_000))))
        .collect();
    for node in &nodes {
        queue.push(Arc::clone(node))?;
        println!("\tpri= {:7}, value= {}", node.priority(), node.value());
    }

    println!("{}", "---------- log data ---------------".bright_white().bold());
    let mut target: Option<Arc<DemoNode>> = None;
    queue.for_each_ordered(|node| {
        if *node.value() == 2 {
            target = Some(Arc::clone(node));
        }
        println!("pri: {:7}, val: {}", node.priority(), node.value());
    })?;

    println!("{}", "---------- change priority --------".bright_white().bold());
    match target {
        Some(node) => {
            println!(
                "change pri {:7} -> 111, pos= {}",
                node.priority(),
                node.position()
            );
            queue.update_priority(&node, 111)?;
        }
        None => println!("no element with value 2, skipping"),
    }

    println!("{}", "---------- pop data ---------------".bright_white().bold());
    loop {
        match queue.pop() {
            Ok(node) => println!("  pri= {:7}, val= {}", node.priority(), node.value()),
            Err(Error::QueueEmpty) => break,
            Err(e) => return Err(e.into()),
        }
    }
    queue.destroy()?;

    println!("{}", "---------- parallel producers -----".bright_white().bold());
    let shared = PriorityQueue::with_config(
        QueueConfig::new(capacity * 4).with_label("parallel"),
        MinFirst,
    )?;
    let priorities: Vec<u32> = (0..capacity * 4).map(|_| rng.gen_range(0..1_000)).collect();
    priorities
        .par_iter()
        .enumerate()
        .try_for_each(|(i, &priority)| shared.push(Arc::new(Node::new(i, priority))))?;
    println!("   {} elements pushed from rayon workers", shared.len());

    let mut previous: Option<u32> = None;
    let mut drained = 0;
    while let Ok(node) = shared.pop() {
        let priority = node.priority();
        if let Some(prev) = previous {
            if priority < prev {
                return Err(format!("out of order: {} popped after {}", priority, prev).into());
            }
        }
        previous = Some(priority);
        drained += 1;
    }

    println!(
        "\n{} {}",
        "✅".bright_green(),
        format!("{} elements drained in priority order", drained)
            .bright_green()
            .bold()
    );

    Ok(())
}
