//! Single-consumer FIFO queue for one event kind.

use std::collections::VecDeque;

/// FIFO of pending events of one kind.
///
/// Ordering within a queue is the only guarantee; ordering across kinds comes
/// from the phase sequence that drains them.
#[derive(Debug)]
pub struct EventQueue<T> {
    queue: VecDeque<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: T) {
        self.queue.push_back(event);
    }

    /// Take the oldest event, or `None` once the queue is drained.
    pub fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    /// Look at the oldest event without consuming it.
    pub fn peek(&self) -> Option<&T> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
