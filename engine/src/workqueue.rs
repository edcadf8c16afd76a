//! FIFO work queue for the exhaustive engine.
//!
//! Enqueuing new configurations at the tail and dequeuing from the head
//! is what gives breadth-first exploration its shortest-witness
//! guarantee — a `VecDeque` gets this for free with O(1) amortized
//! push/pop.

use std::collections::VecDeque;

use crate::compute::Compute;

#[derive(Default)]
pub struct WorkQueue {
    items: VecDeque<Compute>,
}

impl WorkQueue {
    pub fn new() -> Self {
        WorkQueue {
            items: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, item: Compute) {
        self.items.push_back(item);
    }

    pub fn dequeue(&mut self) -> Option<Compute> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
